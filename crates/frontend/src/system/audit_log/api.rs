use contracts::shared::endpoints::{audit as ep, fill};
use contracts::system::audit::{resource_history, AuditFilter, AuditLog};

use crate::shared::api_client::{self, build_query, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store;

/// Журнал с серверными фильтрами; поиск по тексту остаётся на клиенте
pub async fn fetch_audit_logs(filter: AuditFilter) -> Result<Vec<AuditLog>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, move |db| Ok(filter.apply(db.audit_logs.rows()))).await;
    }
    let path = format!("{}{}", ep::LIST, build_query(&filter.query_params()));
    let logs: Vec<AuditLog> = api_client::get(&path).await?;
    Ok(filter.apply(&logs))
}

pub async fn fetch_resource_history(
    resource_type: String,
    resource_id: String,
) -> Result<Vec<AuditLog>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, move |db| {
            Ok(resource_history(db.audit_logs.rows(), &resource_type, &resource_id))
        })
        .await;
    }
    let path = fill(
        ep::RESOURCE_HISTORY,
        &[("resource", resource_type.as_str()), ("id", resource_id.as_str())],
    );
    api_client::get(&path).await
}
