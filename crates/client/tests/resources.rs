mod common;

use common::Harness;
use retailops_client::ClientError;
use retailops_client::QueryOutcome;
use retailops_core::{CategoryId, ItemId, MemberId, Page, UnitId};
use retailops_inventory::{CreateItem, CreateStockAdjustment, CreateUnit, FrontStockFilter, ItemFilter, UnitFilter};

fn new_item(code: &str, name: &str) -> CreateItem {
    CreateItem {
        code: code.to_string(),
        name: name.to_string(),
        unit_id: UnitId::new(),
        category_id: CategoryId::new(),
        purchase_price: 3_000,
        sell_price: 4_500,
        min_stock: None,
    }
}

#[tokio::test]
async fn lists_are_cached_until_a_related_mutation_succeeds() {
    let h = Harness::logged_in().await;
    let branch = h.select_branch("Cabang Utama").await;

    let items = h.client.items();
    let front = h.client.front_stock();
    items.list(&ItemFilter::default()).await.unwrap();
    items.list(&ItemFilter::default()).await.unwrap();
    front.list(&FrontStockFilter::default()).await.unwrap();
    assert_eq!(h.backend().hits("GET", "/api/items"), 1);
    assert_eq!(h.backend().hits("GET", "/api/items/front-stock"), 1);

    h.client
        .stock_adjustments()
        .create(&CreateStockAdjustment {
            branch_id: branch.id,
            item_id: ItemId::new(),
            delta: -2,
            reason: "Rusak".to_string(),
        })
        .await
        .unwrap();
    assert!(
        h.notifier
            .successes()
            .contains(&"Stock adjustment created".to_string())
    );

    items.list(&ItemFilter::default()).await.unwrap();
    front.list(&FrontStockFilter::default()).await.unwrap();
    assert_eq!(h.backend().hits("GET", "/api/items"), 2);
    assert_eq!(h.backend().hits("GET", "/api/items/front-stock"), 2);
}

#[tokio::test]
async fn failed_mutation_shows_server_message_and_invalidates_nothing() {
    let h = Harness::logged_in().await;
    h.select_branch("Cabang Utama").await;
    let items = h.client.items();

    items.list(&ItemFilter::default()).await.unwrap();
    let err = items.create(&new_item("DUP", "Kopi")).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 422, .. }));
    assert_eq!(h.notifier.errors(), vec!["Code already used".to_string()]);

    let key = items.key_for_list(&ItemFilter::default()).unwrap().unwrap();
    assert!(!h.client.cache().entry(&key).await.unwrap().stale);
    items.list(&ItemFilter::default()).await.unwrap();
    assert_eq!(h.backend().hits("GET", "/api/items"), 1);
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_sending() {
    let h = Harness::logged_in().await;
    let err = h.client.items().create(&new_item("BRG-9", "  ")).await.unwrap_err();
    assert!(matches!(err, ClientError::Domain(_)));
    assert_eq!(h.backend().hits("POST", "/api/items"), 0);
    assert_eq!(h.notifier.errors().len(), 1);
}

#[tokio::test]
async fn queries_retry_once_on_server_errors() {
    let h = Harness::logged_in().await;
    let units = h.client.units();

    h.backend().fail_unit_lists(1);
    let page = units.list(&UnitFilter::default()).await.unwrap().ready().unwrap();
    assert_eq!(page.data[0].name, "pcs");
    assert_eq!(h.backend().hits("GET", "/api/units"), 2);

    h.backend().fail_unit_lists(2);
    let filter = UnitFilter {
        page: Page::new(2, 10).unwrap(),
        ..UnitFilter::default()
    };
    let err = units.list(&filter).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 503, .. }));
    assert_eq!(h.backend().hits("GET", "/api/units"), 4);
    assert_eq!(h.notifier.errors(), vec!["Server under maintenance".to_string()]);
}

#[tokio::test]
async fn mutations_are_never_retried() {
    let h = Harness::logged_in().await;
    let err = h
        .client
        .units()
        .create(&CreateUnit {
            name: "lusin".to_string(),
            abbreviation: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(h.backend().hits("POST", "/api/units"), 1);
    assert_eq!(h.notifier.errors(), vec!["Database unavailable".to_string()]);
}

#[tokio::test]
async fn delete_accepts_an_empty_response() {
    let h = Harness::logged_in().await;
    let members = h.client.members();
    members.list(&Default::default()).await.unwrap();

    let id = MemberId::new();
    members.delete(&id).await.unwrap();
    assert_eq!(h.backend().hits("DELETE", &format!("/api/members/{id}")), 1);
    assert_eq!(h.notifier.successes(), vec!["Member deleted".to_string()]);

    members.list(&Default::default()).await.unwrap();
    assert_eq!(h.backend().hits("GET", "/api/members"), 2);
}

#[tokio::test]
async fn detail_without_id_is_disabled() {
    let h = Harness::logged_in().await;
    let before = h.backend().total();
    assert_eq!(h.client.items().detail(None).await.unwrap(), QueryOutcome::Disabled);
    assert_eq!(h.backend().total(), before);
}
