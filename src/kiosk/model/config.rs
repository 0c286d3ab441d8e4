use std::path::PathBuf;
use url::Url;

/// Kiosk configs
#[derive(Debug)]
pub(crate) struct KioskConfig {
    pub service_url: Url,
    pub staff_phone: String,
    pub export_dir: PathBuf,
}

impl KioskConfig {
    pub fn new(service_url: Url, staff_phone: String, export_dir: PathBuf) -> Self {
        Self {
            service_url,
            staff_phone,
            export_dir,
        }
    }
}
