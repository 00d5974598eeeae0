use craftstore_core::purchase::{check_promo, submit_purchase};
use craftstore_core::{
    ALL_CATEGORY, Catalog, MemoryBackend, PromoStatus, PurchaseFlow, PurchasePhase, ShopClient,
    ShopSession,
};
use futures::executor::block_on;

fn sword(catalog: &Catalog) -> craftstore_core::Item {
    catalog.find_item(1).cloned().expect("item 1 in catalog")
}

#[test]
fn vip50_halves_the_dragon_sword() {
    let catalog = Catalog::load_from_static().unwrap();
    let client = ShopClient::new(MemoryBackend::seeded());
    let mut flow = PurchaseFlow::new(sword(&catalog), "Steve");

    flow.set_promo_input("vip50");
    assert!(block_on(check_promo(&client, &mut flow)));
    assert_eq!(flow.quote().final_price, 150);
    assert!(!flow.quote().is_free());

    assert!(block_on(submit_purchase(&client, &mut flow)));
    match flow.phase() {
        PurchasePhase::Succeeded(receipt) => assert_eq!(receipt.final_price, Some(150)),
        other => panic!("unexpected phase {other:?}"),
    }
    assert_eq!(client.transport().promo("VIP50").unwrap().usages, 1);
}

#[test]
fn unknown_code_is_rejected_and_not_sent() {
    let catalog = Catalog::load_from_static().unwrap();
    let client = ShopClient::new(MemoryBackend::seeded());
    let mut flow = PurchaseFlow::new(sword(&catalog), "Steve");

    flow.set_promo_input("nosuch");
    assert!(!block_on(check_promo(&client, &mut flow)));
    assert_eq!(flow.promo_status(), PromoStatus::Rejected);

    assert!(block_on(submit_purchase(&client, &mut flow)));
    let stats = block_on(client.get_stats()).unwrap();
    assert_eq!(stats.total.revenue, 299);
}

#[test]
fn offline_promo_check_counts_as_invalid() {
    let catalog = Catalog::load_from_static().unwrap();
    let client = ShopClient::new(MemoryBackend::seeded());
    client.transport().set_offline(true);
    let mut flow = PurchaseFlow::new(sword(&catalog), "Steve");

    flow.set_promo_input("VIP50");
    assert!(!block_on(check_promo(&client, &mut flow)));
    assert_eq!(flow.promo_status(), PromoStatus::Rejected);

    assert!(!block_on(submit_purchase(&client, &mut flow)));
    assert_eq!(flow.phase(), &PurchasePhase::Failed(None));
}

#[test]
fn code_deactivated_after_check_fails_with_server_message() {
    let catalog = Catalog::load_from_static().unwrap();
    let client = ShopClient::new(MemoryBackend::seeded());
    let mut flow = PurchaseFlow::new(sword(&catalog), "Steve");

    flow.set_promo_input("WELCOME20");
    assert!(block_on(check_promo(&client, &mut flow)));
    let id = client.transport().promo("WELCOME20").unwrap().id;
    block_on(client.toggle_promo(id, false)).unwrap();

    assert!(!block_on(submit_purchase(&client, &mut flow)));
    assert_eq!(
        flow.phase(),
        &PurchasePhase::Failed(Some("Промокод не найден или неактивен".to_string()))
    );
    assert!(flow.can_dismiss());
}

#[test]
fn full_discount_code_makes_item_free() {
    let catalog = Catalog::load_from_static().unwrap();
    let client = ShopClient::new(MemoryBackend::seeded());
    block_on(client.create_promo("GIFT", craftstore_core::Discount::FULL)).unwrap();
    let mut flow = PurchaseFlow::new(sword(&catalog), "Steve");

    flow.set_promo_input("gift");
    assert!(block_on(check_promo(&client, &mut flow)));
    assert!(flow.quote().is_free());
    assert!(block_on(submit_purchase(&client, &mut flow)));
}

#[test]
fn success_marks_exactly_one_item_bought() {
    let catalog = Catalog::load_from_static().unwrap();
    let client = ShopClient::new(MemoryBackend::seeded());
    let mut session = ShopSession::default();
    session.continue_as_guest();

    let mut flow = PurchaseFlow::new(sword(&catalog), session.username());
    assert!(block_on(submit_purchase(&client, &mut flow)));
    if flow.is_success() {
        session.mark_purchased(flow.item().id);
    }

    for item in catalog.filter(ALL_CATEGORY) {
        assert_eq!(session.is_purchased(item.id), item.id == 1);
    }
    let stats = block_on(client.get_stats()).unwrap();
    assert_eq!(stats.unique_players, 1);
}
