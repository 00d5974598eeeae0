//! Scripted storefront scenarios run against a fresh seeded [`MemoryBackend`]
use anyhow::{Context, Result, bail, ensure};
use craftstore_core::admin::{self, AdminError};
use craftstore_core::purchase::{check_promo, submit_purchase};
use craftstore_core::{
    ADMIN_PASSWORD, ALL_CATEGORY, AuthError, BookUpdate, Catalog, Discount, DiscountRange, GUEST_NAME,
    Item, LoginForm, MemoryBackend, PromoBook, PromoDraft, PromoDraftError, PromoStatus,
    PurchaseFlow, PurchasePhase, RegisterForm, ShopClient, ShopSession, SiteSettings, final_price,
};

/// Everything a scenario iteration touches. Built fresh per iteration.
pub struct ScenarioCtx {
    pub client: ShopClient<MemoryBackend>,
    pub catalog: Catalog,
    /// Day stamped on purchases recorded "today".
    pub today: String,
    /// An earlier day, for spreading purchases across the daily series.
    pub yesterday: String,
    pub verbose: bool,
}

impl ScenarioCtx {
    pub fn new(today: String, yesterday: String, verbose: bool) -> Result<Self> {
        let backend = MemoryBackend::seeded();
        backend.set_day(&today);
        Ok(Self {
            client: ShopClient::new(backend),
            catalog: Catalog::load_from_static().context("loading bundled catalog")?,
            today,
            yesterday,
            verbose,
        })
    }

    const fn backend(&self) -> &MemoryBackend {
        self.client.transport()
    }

    fn item(&self, id: u32) -> Result<Item> {
        self.catalog
            .find_item(id)
            .cloned()
            .with_context(|| format!("catalog has no item {id}"))
    }

    fn note(&self, msg: &str) {
        if self.verbose {
            println!("    · {msg}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Smoke,
    PromoCheckout,
    RejectedPromo,
    FreeItem,
    AdminLifecycle,
    SettingsRoundTrip,
    StatsAggregation,
    AuthForms,
    OfflineCheckout,
}

impl Scenario {
    pub const ALL: [Self; 9] = [
        Self::Smoke,
        Self::PromoCheckout,
        Self::RejectedPromo,
        Self::FreeItem,
        Self::AdminLifecycle,
        Self::SettingsRoundTrip,
        Self::StatsAggregation,
        Self::AuthForms,
        Self::OfflineCheckout,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::PromoCheckout => "promo-checkout",
            Self::RejectedPromo => "rejected-promo",
            Self::FreeItem => "free-item",
            Self::AdminLifecycle => "admin-lifecycle",
            Self::SettingsRoundTrip => "settings-roundtrip",
            Self::StatsAggregation => "stats-aggregation",
            Self::AuthForms => "auth-forms",
            Self::OfflineCheckout => "offline-checkout",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Smoke => "Catalog loads, filters and showcase are consistent",
            Self::PromoCheckout => "Active promo discounts a purchase and counts a usage",
            Self::RejectedPromo => "Inactive or unknown codes are refused, purchase at full price",
            Self::FreeItem => "A 100% code created by the admin makes an item free",
            Self::AdminLifecycle => "Promo list create, toggle and delete stay in sync",
            Self::SettingsRoundTrip => "Settings save and reload; invalid settings never hit the API",
            Self::StatsAggregation => "Purchases roll up into today/total, players and top items",
            Self::AuthForms => "Registration and login validation, admin password, guest session",
            Self::OfflineCheckout => "Transport failures reject promos and allow a retried purchase",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub async fn run(self, ctx: &ScenarioCtx) -> Result<()> {
        match self {
            Self::Smoke => smoke(ctx).await,
            Self::PromoCheckout => promo_checkout(ctx).await,
            Self::RejectedPromo => rejected_promo(ctx).await,
            Self::FreeItem => free_item(ctx).await,
            Self::AdminLifecycle => admin_lifecycle(ctx).await,
            Self::SettingsRoundTrip => settings_round_trip(ctx).await,
            Self::StatsAggregation => stats_aggregation(ctx).await,
            Self::AuthForms => auth_forms(),
            Self::OfflineCheckout => offline_checkout(ctx).await,
        }
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    Scenario::ALL
        .into_iter()
        .map(|s| (s.key(), s.description()))
        .collect()
}

fn draft(code: &str, discount: &str) -> PromoDraft {
    PromoDraft {
        code: code.to_string(),
        discount: discount.to_string(),
    }
}

async fn loaded_book(ctx: &ScenarioCtx) -> Result<PromoBook> {
    let mut book = PromoBook::default();
    book.apply(admin::load_promos(&ctx.client).await?);
    Ok(book)
}

async fn buy(ctx: &ScenarioCtx, item: &Item, username: &str, code: Option<&str>) -> Result<PurchaseFlow> {
    let mut flow = PurchaseFlow::new(item.clone(), username);
    if let Some(code) = code {
        flow.set_promo_input(code);
        check_promo(&ctx.client, &mut flow).await;
    }
    if !submit_purchase(&ctx.client, &mut flow).await {
        bail!("purchase of {} failed: {:?}", item.name, flow.phase());
    }
    Ok(flow)
}

fn receipt_price(flow: &PurchaseFlow) -> Option<u32> {
    match flow.phase() {
        PurchasePhase::Succeeded(receipt) => receipt.final_price,
        _ => None,
    }
}

async fn smoke(ctx: &ScenarioCtx) -> Result<()> {
    let everything = ctx.catalog.filter(ALL_CATEGORY);
    ensure!(!everything.is_empty(), "catalog is empty");
    let per_category: usize = ctx
        .catalog
        .categories
        .iter()
        .filter(|c| c.as_str() != ALL_CATEGORY)
        .map(|c| ctx.catalog.filter(c).len())
        .sum();
    ensure!(
        per_category == everything.len(),
        "categories cover {per_category} items, catalog has {}",
        everything.len()
    );

    let showcase = ctx.catalog.featured(6);
    ensure!(!showcase.is_empty() && showcase.len() <= 6, "showcase size {}", showcase.len());
    ctx.note(&format!("{} items, {} in showcase", everything.len(), showcase.len()));

    let settings = ctx.client.get_settings().await?;
    ensure!(settings == SiteSettings::default(), "seeded settings differ: {settings:?}");
    Ok(())
}

async fn promo_checkout(ctx: &ScenarioCtx) -> Result<()> {
    let sword = ctx.item(1)?;
    let flow = buy(ctx, &sword, "Steve", Some(" vip50 ")).await?;
    let half = Discount::new(50)?;
    ensure!(
        flow.promo_status() == PromoStatus::Applied(half),
        "VIP50 not applied: {:?}",
        flow.promo_status()
    );
    let expected = final_price(sword.price, half);
    ensure!(flow.quote().final_price == expected, "quote {:?}", flow.quote());
    ensure!(
        receipt_price(&flow) == Some(expected),
        "server charged {:?}, expected {expected}",
        receipt_price(&flow)
    );
    let usages = ctx.backend().promo("VIP50").map(|p| p.usages);
    ensure!(usages == Some(1), "VIP50 usages {usages:?}");
    ctx.note(&format!("{} for {expected} ₽", sword.name));
    Ok(())
}

async fn rejected_promo(ctx: &ScenarioCtx) -> Result<()> {
    let bow = ctx.item(8)?;
    for code in ["OLD30", "NOSUCHCODE"] {
        let mut flow = PurchaseFlow::new(bow.clone(), "Alex");
        flow.set_promo_input(code);
        ensure!(!check_promo(&ctx.client, &mut flow).await, "{code} was accepted");
        ensure!(flow.promo_status() == PromoStatus::Rejected, "{code}: {:?}", flow.promo_status());
        ensure!(submit_purchase(&ctx.client, &mut flow).await, "purchase after {code} failed");
        ensure!(
            receipt_price(&flow) == Some(bow.price),
            "{code}: charged {:?}",
            receipt_price(&flow)
        );
    }
    let usages = ctx.backend().promo("OLD30").map(|p| p.usages);
    ensure!(usages == Some(0), "inactive code counted: {usages:?}");
    Ok(())
}

async fn free_item(ctx: &ScenarioCtx) -> Result<()> {
    let book = loaded_book(ctx).await?;
    let update = admin::create_promo(&ctx.client, &draft("gift100", "100"), DiscountRange::Api, &book).await?;
    let BookUpdate::Prepend(created) = update else {
        bail!("create returned {update:?}");
    };
    ensure!(created.code == "GIFT100" && created.discount == Discount::FULL, "created {created:?}");

    let dragon = ctx.item(6)?;
    let flow = buy(ctx, &dragon, "Notch", Some("gift100")).await?;
    ensure!(flow.quote().is_free(), "quote {:?}", flow.quote());
    ensure!(receipt_price(&flow) == Some(0), "charged {:?}", receipt_price(&flow));
    Ok(())
}

async fn admin_lifecycle(ctx: &ScenarioCtx) -> Result<()> {
    let mut book = loaded_book(ctx).await?;
    ensure!(book.promos().len() == 3, "seeded {} promos", book.promos().len());
    ensure!(
        book.promos().first().map(|p| p.code.as_str()) == Some("VIP50"),
        "list is not newest first"
    );

    book.apply(admin::create_promo(&ctx.client, &draft("summer25", "25"), DiscountRange::Api, &book).await?);
    let created = book
        .promos()
        .first()
        .cloned()
        .context("created promo missing")?;
    ensure!(created.code == "SUMMER25", "prepended {}", created.code);

    match admin::create_promo(&ctx.client, &draft("Summer25", "5"), DiscountRange::Api, &book).await {
        Err(AdminError::Draft(PromoDraftError::Duplicate(code))) => ensure!(code == "SUMMER25"),
        other => bail!("duplicate was not refused locally: {other:?}"),
    }

    book.apply(admin::toggle_promo(&ctx.client, created.id, false).await);
    ensure!(book.find(created.id).is_some_and(|p| !p.active), "local toggle lost");
    ensure!(
        ctx.backend().promo("SUMMER25").is_some_and(|p| !p.active),
        "backend toggle lost"
    );

    book.apply(admin::delete_promo(&ctx.client, created.id).await);
    ensure!(book.find(created.id).is_none(), "local delete lost");
    ensure!(ctx.backend().promo("SUMMER25").is_none(), "backend delete lost");

    ctx.backend().set_fail_mutations(true);
    let welcome = ctx.backend().promo("WELCOME20").context("WELCOME20 missing")?;
    book.apply(admin::toggle_promo(&ctx.client, welcome.id, false).await);
    ctx.backend().set_fail_mutations(false);
    ensure!(book.find(welcome.id).is_some_and(|p| !p.active), "failed toggle not applied locally");
    ensure!(
        ctx.backend().promo("WELCOME20").is_some_and(|p| p.active),
        "failed toggle changed the backend"
    );
    ctx.note(&format!("{} promos active locally", book.active_count()));
    Ok(())
}

async fn settings_round_trip(ctx: &ScenarioCtx) -> Result<()> {
    let updated = SiteSettings {
        server_name: "BlockHaven".to_string(),
        server_address: "mc.blockhaven.net".to_string(),
        welcome_text: "Новый сезон!".to_string(),
        primary_color: "#3b82f6".to_string(),
    };
    admin::save_settings(&ctx.client, &updated).await?;
    let reloaded = ctx.client.get_settings().await?;
    ensure!(reloaded == updated, "reloaded {reloaded:?}");

    let calls = ctx.backend().calls().len();
    let broken = SiteSettings {
        primary_color: "green".to_string(),
        ..updated.clone()
    };
    match admin::save_settings(&ctx.client, &broken).await {
        Err(AdminError::Settings(_)) => {}
        other => bail!("invalid colour was not refused: {other:?}"),
    }
    ensure!(ctx.backend().calls().len() == calls, "invalid settings reached the API");
    Ok(())
}

async fn stats_aggregation(ctx: &ScenarioCtx) -> Result<()> {
    let diamonds = ctx.item(7)?;
    let sword = ctx.item(1)?;

    ctx.backend().set_day(&ctx.yesterday);
    buy(ctx, &diamonds, "Steve", None).await?;
    buy(ctx, &diamonds, "Steve", None).await?;
    ctx.backend().set_day(&ctx.today);
    buy(ctx, &sword, "Alex", Some("VIP50")).await?;

    let stats = ctx.client.get_stats().await?;
    let discounted = final_price(sword.price, Discount::new(50)?);
    let expected_total = u64::from(diamonds.price) * 2 + u64::from(discounted);
    ensure!(stats.total.count == 3, "total count {}", stats.total.count);
    ensure!(stats.total.revenue == expected_total, "total revenue {}", stats.total.revenue);
    ensure!(
        stats.today.count == 1 && stats.today.revenue == u64::from(discounted),
        "today {:?}",
        stats.today
    );
    ensure!(stats.unique_players == 2, "players {}", stats.unique_players);
    ensure!(stats.active_promos == 2, "active promos {}", stats.active_promos);
    ensure!(stats.daily.len() == 2, "daily points {}", stats.daily.len());

    let bars = stats.top_item_bars();
    let ranking: Vec<(u32, u8)> = bars.iter().map(|(item, pct)| (item.id, *pct)).collect();
    ensure!(ranking == vec![(7, 100), (1, 50)], "top items {ranking:?}");
    Ok(())
}

fn auth_forms() -> Result<()> {
    let register = RegisterForm {
        name: "Steve".to_string(),
        username: "steve".to_string(),
        password: "diamond".to_string(),
        confirm: "diamond".to_string(),
    };
    let identity = register.submit()?;
    ensure!(!identity.is_admin, "regular password granted admin");

    let mismatch = RegisterForm {
        confirm: "diamonds".to_string(),
        ..register.clone()
    };
    ensure!(mismatch.submit() == Err(AuthError::PasswordMismatch));
    let short = RegisterForm {
        username: "st".to_string(),
        ..register
    };
    ensure!(short.submit() == Err(AuthError::UsernameTooShort));

    let admin = LoginForm {
        username: "owner".to_string(),
        password: ADMIN_PASSWORD.to_string(),
    }
    .submit()?;
    ensure!(admin.is_admin, "admin password not recognised");
    ensure!(LoginForm::default().submit() == Err(AuthError::EmptyUsername));

    let mut session = ShopSession::default();
    ensure!(session.identity().is_none());
    session.continue_as_guest();
    ensure!(session.username() == GUEST_NAME && !session.is_admin());
    session.sign_in(admin);
    session.mark_purchased(4);
    ensure!(session.is_admin() && session.is_purchased(4) && !session.is_purchased(5));
    Ok(())
}

async fn offline_checkout(ctx: &ScenarioCtx) -> Result<()> {
    let shield = ctx.item(2)?;
    let mut flow = PurchaseFlow::new(shield.clone(), "Alex");
    flow.set_promo_input("WELCOME20");

    ctx.backend().set_offline(true);
    ensure!(!check_promo(&ctx.client, &mut flow).await, "promo accepted while offline");
    ensure!(!submit_purchase(&ctx.client, &mut flow).await, "purchase succeeded while offline");
    ensure!(
        *flow.phase() == PurchasePhase::Failed(None),
        "offline failure phase {:?}",
        flow.phase()
    );
    ctx.backend().set_offline(false);

    ensure!(submit_purchase(&ctx.client, &mut flow).await, "retry failed");
    ensure!(
        receipt_price(&flow) == Some(shield.price),
        "retry charged {:?}",
        receipt_price(&flow)
    );
    ensure!(ctx.backend().purchase_count() == 1, "purchases {}", ctx.backend().purchase_count());
    Ok(())
}
