use super::api_base;
use super::catalog_client::status_error;
use super::dto::{ApiEnvelope, ImportCount, PreviewResponse, SheetsResponse, extract_detail};
use crate::domain::errors::{AppError, NetworkResult};
use crate::domain::import::{ImportOutcome, PreviewRow};
use crate::domain::logging::{LogComponent, get_logger};
use futures::channel::oneshot;
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{File, FormData, XmlHttpRequest};

/// Client for the spreadsheet endpoints: sheet discovery, preview and the
/// import call with transport-progress reporting
pub struct ImportClient {
    base_url: String,
}

impl ImportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Client pointed at the backend serving the current page
    pub fn at_page_origin() -> Self {
        Self::new(api_base())
    }

    fn sheets_url(&self) -> String {
        format!("{}/api/excel/sheets", self.base_url)
    }

    fn preview_url(&self, sheet: &str) -> String {
        let encoded = String::from(js_sys::encode_uri_component(sheet));
        format!("{}/api/excel/preview/{encoded}", self.base_url)
    }

    fn import_url(&self, sheet: &str) -> String {
        let encoded = String::from(js_sys::encode_uri_component(sheet));
        format!("{}/api/excel/import/{encoded}", self.base_url)
    }

    /// Ask the backend which sheets the workbook contains
    pub async fn discover_sheets(&self, file: &File) -> NetworkResult<Vec<String>> {
        let form = multipart_with_file(file)?;
        let response = Request::post(&self.sheets_url())
            .body(form)
            .map_err(|e| AppError::NetworkError(format!("Failed to build request: {e:?}")))?
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Sheet discovery failed: {e:?}")))?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        let sheets: SheetsResponse = response
            .json()
            .await
            .map_err(|e| AppError::DecodeError(format!("Invalid sheet list: {e:?}")))?;
        get_logger().info(
            LogComponent::Infrastructure("ImportAPI"),
            &format!("📑 Discovered {} sheet(s)", sheets.sheets.len()),
        );
        Ok(sheets.sheets)
    }

    /// Fetch the first rows of one sheet for display
    pub async fn preview_sheet(&self, file: &File, sheet: &str) -> NetworkResult<Vec<PreviewRow>> {
        let form = multipart_with_file(file)?;
        let response = Request::post(&self.preview_url(sheet))
            .body(form)
            .map_err(|e| AppError::NetworkError(format!("Failed to build request: {e:?}")))?
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Preview failed: {e:?}")))?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        let preview: PreviewResponse = response
            .json()
            .await
            .map_err(|e| AppError::DecodeError(format!("Invalid preview: {e:?}")))?;
        Ok(preview.preview)
    }

    /// Run the import. The fetch API cannot observe upload progress, so this
    /// call goes through XmlHttpRequest and reports transport bytes through
    /// `on_progress(loaded, total)`; `total` is None when not computable.
    pub async fn import_sheet<F>(
        &self,
        file: &File,
        sheet: &str,
        mut on_progress: F,
    ) -> NetworkResult<ImportOutcome>
    where
        F: FnMut(u64, Option<u64>) + 'static,
    {
        let url = self.import_url(sheet);
        let form = multipart_with_file(file)?;

        let xhr = XmlHttpRequest::new()
            .map_err(|e| AppError::NetworkError(format!("XHR unavailable: {e:?}")))?;
        xhr.open("POST", &url)
            .map_err(|e| AppError::NetworkError(format!("Failed to open request: {e:?}")))?;

        let upload = xhr
            .upload()
            .map_err(|e| AppError::NetworkError(format!("Upload handle unavailable: {e:?}")))?;
        let progress_cb = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(
            move |event: web_sys::ProgressEvent| {
                let total = if event.length_computable() {
                    Some(event.total() as u64)
                } else {
                    None
                };
                on_progress(event.loaded() as u64, total);
            },
        );
        upload.set_onprogress(Some(progress_cb.as_ref().unchecked_ref()));

        // loadend fires for success, HTTP errors and network failures alike
        let (sender, receiver) = oneshot::channel::<(u16, String)>();
        let mut sender = Some(sender);
        let xhr_done = xhr.clone();
        let end_cb = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(
            move |_event: web_sys::ProgressEvent| {
                let status = xhr_done.status().unwrap_or(0);
                let body = xhr_done
                    .response_text()
                    .ok()
                    .flatten()
                    .unwrap_or_default();
                if let Some(sender) = sender.take() {
                    let _ = sender.send((status, body));
                }
            },
        );
        xhr.set_onloadend(Some(end_cb.as_ref().unchecked_ref()));

        xhr.send_with_opt_form_data(Some(&form))
            .map_err(|e| AppError::NetworkError(format!("Failed to send upload: {e:?}")))?;

        let outcome = receiver
            .await
            .map_err(|_| AppError::NetworkError("Upload interrupted".to_string()));

        // Detach before the closures drop; no events fire after loadend
        upload.set_onprogress(None);
        xhr.set_onloadend(None);
        drop(progress_cb);
        drop(end_cb);

        let (status, body) = outcome?;
        if status == 0 {
            return Err(AppError::NetworkError(
                "Network failure during upload".to_string(),
            ));
        }
        if !(200..300).contains(&status) {
            return Err(AppError::ServerError {
                status,
                detail: extract_detail(&body),
            });
        }
        let envelope: ApiEnvelope<ImportCount> = serde_json::from_str(&body)
            .map_err(|e| AppError::DecodeError(format!("Invalid import response: {e}")))?;
        let outcome = envelope.to_domain();
        get_logger().info(
            LogComponent::Infrastructure("ImportAPI"),
            &format!(
                "✅ Import finished: {} ({} rows)",
                outcome.message, outcome.imported
            ),
        );
        Ok(outcome)
    }
}

fn multipart_with_file(file: &File) -> NetworkResult<FormData> {
    let form = FormData::new()
        .map_err(|e| AppError::NetworkError(format!("FormData unavailable: {e:?}")))?;
    form.append_with_blob("file", file)
        .map_err(|e| AppError::NetworkError(format!("Failed to attach file: {e:?}")))?;
    Ok(form)
}
