use super::dto::{ProductsPayload, extract_detail};
use super::api_base;
use crate::domain::catalog::{Product, ProductDraft};
use crate::domain::errors::{AppError, NetworkResult};
use crate::domain::logging::{LogComponent, get_logger};
use gloo_net::http::{Request, Response};

/// Plain request/response client for the product endpoints
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Client pointed at the backend serving the current page
    pub fn at_page_origin() -> Self {
        Self::new(api_base())
    }

    fn products_url(&self) -> String {
        format!("{}/api/products", self.base_url)
    }

    fn product_url(&self, id: u64) -> String {
        format!("{}/api/products/{id}", self.base_url)
    }

    pub async fn list_products(&self) -> NetworkResult<Vec<Product>> {
        let response = Request::get(&self.products_url())
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to fetch products: {e:?}")))?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        let payload: ProductsPayload = response
            .json()
            .await
            .map_err(|e| AppError::DecodeError(format!("Invalid product listing: {e:?}")))?;
        let products = payload.into_products();
        get_logger().debug(
            LogComponent::Infrastructure("CatalogAPI"),
            &format!("📦 Loaded {} products", products.len()),
        );
        Ok(products)
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> NetworkResult<Product> {
        let response = Request::post(&self.products_url())
            .json(draft)
            .map_err(|e| AppError::NetworkError(format!("Failed to encode product: {e:?}")))?
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to create product: {e:?}")))?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| AppError::DecodeError(format!("Invalid created product: {e:?}")))
    }

    pub async fn update_product(&self, id: u64, draft: &ProductDraft) -> NetworkResult<Product> {
        let response = Request::put(&self.product_url(id))
            .json(draft)
            .map_err(|e| AppError::NetworkError(format!("Failed to encode product: {e:?}")))?
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to update product: {e:?}")))?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| AppError::DecodeError(format!("Invalid updated product: {e:?}")))
    }

    pub async fn delete_product(&self, id: u64) -> NetworkResult<()> {
        let response = Request::delete(&self.product_url(id))
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to delete product: {e:?}")))?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        Ok(())
    }
}

/// Turn a non-2xx response into a ServerError, keeping the backend's
/// detail field when the body carries one
pub(crate) async fn status_error(response: Response) -> AppError {
    let status = response.status();
    let detail = response
        .text()
        .await
        .ok()
        .and_then(|body| extract_detail(&body));
    AppError::ServerError { status, detail }
}
