use std::sync::Arc;

use crate::config::SlateConfig;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub collection: String,
    pub slate: Arc<SlateConfig>,
}
