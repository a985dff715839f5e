use std::sync::Arc;

use dashboard::Dashboard;

use crate::assets::StaticAssets;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dashboard: Arc<Dashboard>,
    pub(crate) page: Arc<str>,
    pub(crate) assets: Arc<StaticAssets>,
}
