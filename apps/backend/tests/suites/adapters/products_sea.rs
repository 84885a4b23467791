use catalog_backend::repos::{ProductDraft, ProductRepository};

use super::product_repo;

fn draft(name: &str, price: f64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: format!("{name} description"),
        price,
    }
}

#[tokio::test]
async fn create_assigns_ids_and_list_is_newest_first() {
    let repo = product_repo().await;
    let first = repo.create(draft("Lamp", 19.5)).await.unwrap();
    let second = repo.create(draft("Desk", 120.0)).await.unwrap();
    assert!(second.id > first.id);

    let listed: Vec<i64> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, [second.id, first.id]);
    assert_eq!(repo.find(first.id).await.unwrap().unwrap().price, 19.5);
}

#[tokio::test]
async fn update_replaces_and_delete_removes() {
    let repo = product_repo().await;
    let lamp = repo.create(draft("Lamp", 19.5)).await.unwrap();

    let updated = repo
        .update(lamp.id, draft("Floor lamp", 45.0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Floor lamp");
    assert_eq!(updated.description, "Floor lamp description");
    assert_eq!(updated.created_at, lamp.created_at);

    assert!(repo.update(999, draft("Ghost", 1.0)).await.unwrap().is_none());
    assert!(repo.delete(lamp.id).await.unwrap());
    assert!(repo.find(lamp.id).await.unwrap().is_none());
    assert!(!repo.delete(lamp.id).await.unwrap());
}
