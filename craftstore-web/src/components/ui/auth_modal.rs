use crate::components::modal::Modal;
use crate::i18n::t;
use crate::shop::{AuthError, AuthMode, Identity, LoginForm, RegisterForm};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AuthModalProps {
    /// Fired with the signed-in identity, or the guest identity on dismissal.
    pub on_auth: Callback<Identity>,
    #[prop_or_default]
    pub initial_mode: AuthMode,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Username,
    Password,
    Confirm,
}

impl Field {
    const fn label_key(self) -> &'static str {
        match self {
            Self::Name => "auth.name",
            Self::Username => "auth.username",
            Self::Password => "auth.password",
            Self::Confirm => "auth.confirm",
        }
    }

    const fn input_type(self) -> &'static str {
        match self {
            Self::Name | Self::Username => "text",
            Self::Password | Self::Confirm => "password",
        }
    }

    const fn id(self) -> &'static str {
        match self {
            Self::Name => "auth-name",
            Self::Username => "auth-username",
            Self::Password => "auth-password",
            Self::Confirm => "auth-confirm",
        }
    }
}

const fn fields_for(mode: AuthMode) -> &'static [Field] {
    match mode {
        AuthMode::Register => &[Field::Name, Field::Username, Field::Password, Field::Confirm],
        AuthMode::Login => &[Field::Username, Field::Password],
    }
}

fn field_value(form: &RegisterForm, field: Field) -> &str {
    match field {
        Field::Name => &form.name,
        Field::Username => &form.username,
        Field::Password => &form.password,
        Field::Confirm => &form.confirm,
    }
}

fn set_field(form: &mut RegisterForm, field: Field, value: String) {
    match field {
        Field::Name => form.name = value,
        Field::Username => form.username = value,
        Field::Password => form.password = value,
        Field::Confirm => form.confirm = value,
    }
}

/// Run the checks for `mode` over the shared field values.
fn submit(mode: AuthMode, form: &RegisterForm) -> Result<Identity, AuthError> {
    match mode {
        AuthMode::Register => form.submit(),
        AuthMode::Login => LoginForm {
            username: form.username.clone(),
            password: form.password.clone(),
        }
        .submit(),
    }
}

#[function_component(AuthModal)]
pub fn auth_modal(p: &AuthModalProps) -> Html {
    let mode = use_state(|| p.initial_mode);
    let form = use_state(RegisterForm::default);
    let error = use_state(|| None::<AuthError>);

    let switch_mode = {
        let mode = mode.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            mode.set(match *mode {
                AuthMode::Register => AuthMode::Login,
                AuthMode::Login => AuthMode::Register,
            });
            error.set(None);
        })
    };

    let on_submit = {
        let mode = mode.clone();
        let form = form.clone();
        let error = error.clone();
        let on_auth = p.on_auth.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match submit(*mode, &form) {
                Ok(identity) => {
                    error.set(None);
                    on_auth.emit(identity);
                }
                Err(err) => error.set(Some(err)),
            }
        })
    };

    let on_guest = {
        let on_auth = p.on_auth.clone();
        Callback::from(move |()| on_auth.emit(Identity::guest()))
    };
    let on_guest_click = {
        let on_guest = on_guest.clone();
        Callback::from(move |_: MouseEvent| on_guest.emit(()))
    };

    let inputs = fields_for(*mode).iter().map(|&field| {
        let oninput = {
            let form = form.clone();
            Callback::from(move |e: InputEvent| {
                if let Some(input) = e
                    .target()
                    .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                {
                    let mut next = (*form).clone();
                    set_field(&mut next, field, input.value());
                    form.set(next);
                }
            })
        };
        html! {
            <div class="field" key={field.id()}>
                <label for={field.id()}>{ t(field.label_key()) }</label>
                <input
                    id={field.id()}
                    class="input"
                    type={field.input_type()}
                    value={field_value(&form, field).to_string()}
                    {oninput}
                />
            </div>
        }
    });

    let (title, submit_label, switch_label) = match *mode {
        AuthMode::Register => ("auth.title_register", "auth.submit_register", "auth.to_login"),
        AuthMode::Login => ("auth.title_login", "auth.submit_login", "auth.to_register"),
    };

    html! {
        <Modal title={AttrValue::from(t(title))} class={classes!("auth-modal")} on_close={on_guest}>
            <form class="auth-form" onsubmit={on_submit}>
                { for inputs }
                if let Some(err) = *error {
                    <div class="auth-form__error" role="alert">{ format!("⚠️ {}", t(err.message_key())) }</div>
                }
                <button type="submit" class="btn btn--primary">{ t(submit_label) }</button>
            </form>
            <div class="auth-form__links">
                <button type="button" class="link-btn" onclick={switch_mode}>{ t(switch_label) }</button>
                <button type="button" class="link-btn" onclick={on_guest_click}>{ t("auth.guest") }</button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(mode: AuthMode) -> String {
        let props = AuthModalProps {
            on_auth: Callback::noop(),
            initial_mode: mode,
        };
        block_on(LocalServerRenderer::<AuthModal>::with_props(props).render())
    }

    #[test]
    fn register_mode_shows_four_fields() {
        crate::i18n::set_lang("ru");
        let html = render(AuthMode::Register);
        assert!(html.contains("auth-confirm"));
        assert!(html.contains("auth-name"));
        assert_eq!(html.matches("class=\"field\"").count(), 4);
    }

    #[test]
    fn login_mode_asks_for_nickname_and_password() {
        let html = render(AuthMode::Login);
        assert_eq!(html.matches("class=\"field\"").count(), 2);
        assert!(!html.contains("auth-confirm"));
    }

    #[test]
    fn login_reuses_shared_field_values() {
        let form = RegisterForm {
            name: String::new(),
            username: "Notch".into(),
            password: "admin123".into(),
            confirm: String::new(),
        };
        assert_eq!(
            submit(AuthMode::Login, &form),
            Ok(Identity {
                username: "Notch".into(),
                is_admin: true
            })
        );
        assert_eq!(submit(AuthMode::Register, &form), Err(AuthError::EmptyName));
    }
}
