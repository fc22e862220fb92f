// ── API-to-domain conversions ──
//
// Field-for-field: the decoder already guarantees every scalar is present,
// so nothing is defaulted or reordered here.

use casaos_api::{AppGridEntry, AppTitle};

use crate::model::{ApplicationRecord, TitleVariant};

impl From<AppTitle> for TitleVariant {
    fn from(t: AppTitle) -> Self {
        Self {
            custom: t.custom,
            en_us: t.en_us,
        }
    }
}

impl From<AppGridEntry> for ApplicationRecord {
    fn from(e: AppGridEntry) -> Self {
        Self {
            store_app_id: e.store_app_id,
            app_type: e.app_type,
            author_type: e.author_type,
            hostname: e.hostname,
            icon: e.icon,
            image: e.image,
            index: e.index,
            is_uncontrolled: e.is_uncontrolled,
            port: e.port,
            scheme: e.scheme,
            status: e.status,
            titles: e.title.into_iter().map(TitleVariant::from).collect(),
        }
    }
}

impl From<TitleVariant> for AppTitle {
    fn from(t: TitleVariant) -> Self {
        Self {
            custom: t.custom,
            en_us: t.en_us,
        }
    }
}

impl From<ApplicationRecord> for AppGridEntry {
    fn from(r: ApplicationRecord) -> Self {
        Self {
            store_app_id: r.store_app_id,
            app_type: r.app_type,
            author_type: r.author_type,
            hostname: r.hostname,
            icon: r.icon,
            image: r.image,
            index: r.index,
            is_uncontrolled: r.is_uncontrolled,
            port: r.port,
            scheme: r.scheme,
            status: r.status,
            title: r.titles.into_iter().map(AppTitle::from).collect(),
        }
    }
}
