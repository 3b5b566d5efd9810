use crate::application::change_feed::{ChangeFeed, ListenerHandle};
use crate::domain::catalog::{Product, ProductDraft};
use crate::domain::errors::NetworkResult;
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::http::CatalogClient;
use std::rc::Rc;

/// Shared data-access layer for the product collection. Every mutation and
/// every completed import notifies the change feed, so the charts panel and
/// the product list refresh without polling each other.
pub struct CatalogStore {
    client: CatalogClient,
    feed: ChangeFeed,
}

impl CatalogStore {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            feed: ChangeFeed::new(),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn() + 'static,
    {
        self.feed.subscribe(listener)
    }

    pub fn unsubscribe(&self, handle: ListenerHandle) {
        self.feed.unsubscribe(handle);
    }

    /// Plain fetch; reading never notifies
    pub async fn load(&self) -> NetworkResult<Vec<Product>> {
        self.client.list_products().await
    }

    pub async fn create(&self, draft: &ProductDraft) -> NetworkResult<Product> {
        let created = self.client.create_product(draft).await?;
        get_logger().info(
            LogComponent::Application("CatalogStore"),
            &format!("✅ Created product '{}'", created.name),
        );
        self.feed.notify();
        Ok(created)
    }

    pub async fn update(&self, id: u64, draft: &ProductDraft) -> NetworkResult<Product> {
        let updated = self.client.update_product(id, draft).await?;
        get_logger().info(
            LogComponent::Application("CatalogStore"),
            &format!("✅ Updated product #{id}"),
        );
        self.feed.notify();
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> NetworkResult<()> {
        self.client.delete_product(id).await?;
        get_logger().info(
            LogComponent::Application("CatalogStore"),
            &format!("🗑️ Deleted product #{id}"),
        );
        self.feed.notify();
        Ok(())
    }

    /// A completed import changed the collection server-side
    pub fn notify_imported(&self) {
        self.feed.notify();
    }
}

thread_local! {
    static SHARED_STORE: Rc<CatalogStore> =
        Rc::new(CatalogStore::new(CatalogClient::at_page_origin()));
}

/// Process-wide store shared by the Leptos views and the JS-facing API.
/// The listener list itself stays explicit inside the store's change feed.
pub fn shared_store() -> Rc<CatalogStore> {
    SHARED_STORE.with(Rc::clone)
}
