use chrono::Utc;
use contracts::domain::a005_work_order::{
    next_work_order_id, WorkOrder, WorkOrderDto, WorkOrderPatch, WorkOrderStatus,
};
use contracts::shared::endpoints::{fill, with_id, workorders as ep};
use contracts::system::audit::AuditAction;
use serde::Serialize;

use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store;
use crate::system::auth::storage;

#[derive(Serialize)]
struct CommentRequest<'a> {
    author: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct TaskUpdate {
    completed: bool,
}

pub async fn fetch_work_orders() -> Result<Vec<WorkOrder>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::KanbanList, |db| Ok(db.work_orders.list())).await;
    }
    api_client::get(ep::LIST).await
}

pub async fn fetch_work_order(id: String) -> Result<WorkOrder, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::KanbanGet, move |db| db.work_orders.get(&id)).await;
    }
    api_client::get(&with_id(ep::ITEM, &id)).await
}

/// Новый наряд продолжает последовательность `WO-<n>`
pub async fn create_work_order(dto: WorkOrderDto) -> Result<WorkOrder, ApiError> {
    dto.validate()?;
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| {
            let id = next_work_order_id(db.work_orders.rows());
            let order = db.work_orders.insert(WorkOrder::from_dto(id, &dto, Utc::now())?);
            let details = format!("Created work order {}", order.title);
            db.audit(actor.as_ref(), AuditAction::Create, "workorder", Some(order.id.as_str()), details);
            Ok(order)
        })
        .await;
    }
    api_client::post(ep::LIST, &dto).await
}

pub async fn update_work_order(id: String, patch: WorkOrderPatch) -> Result<WorkOrder, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::KanbanUpdate, move |db| {
            db.work_orders.update_with(&id, |order| {
                patch.apply(order);
                Ok(())
            })
        })
        .await;
    }
    api_client::put(&with_id(ep::ITEM, &id), &patch).await
}

pub async fn update_status(id: String, status: WorkOrderStatus) -> Result<WorkOrder, ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::KanbanUpdate, move |db| {
            let previous = db.work_orders.get(&id)?.status;
            let order = db.work_orders.update_with(&id, |order| {
                WorkOrderPatch::status(status).apply(order);
                Ok(())
            })?;
            if previous != order.status {
                let details = format!("{} -> {}", previous.label(), order.status.label());
                db.audit(actor.as_ref(), AuditAction::StatusChange, "workorder", Some(&id), details);
            }
            Ok(order)
        })
        .await;
    }
    api_client::put(&with_id(ep::STATUS, &id), &WorkOrderPatch::status(status)).await
}

pub async fn add_comment(id: String, author: String, message: String) -> Result<WorkOrder, ApiError> {
    if message.trim().is_empty() {
        return Err(ApiError::Validation("Comment cannot be empty".into()));
    }
    if use_mock() {
        return mock_store::call(MockOp::KanbanUpdate, move |db| {
            db.work_orders.update_with(&id, |order| {
                order.add_comment(&author, &message, Utc::now());
                Ok(())
            })
        })
        .await;
    }
    let body = CommentRequest {
        author: &author,
        message: &message,
    };
    api_client::post(&with_id(ep::COMMENTS, &id), &body).await
}

/// Переключить отметку задачи; `completed` - новое значение
pub async fn toggle_task(id: String, task_id: String, completed: bool) -> Result<WorkOrder, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::KanbanUpdate, move |db| {
            db.work_orders.update_with(&id, |order| {
                if order.toggle_task(&task_id) {
                    Ok(())
                } else {
                    Err(format!("Task {} not found", task_id))
                }
            })
        })
        .await;
    }
    let path = fill(ep::TASK, &[("id", &id), ("taskId", &task_id)]);
    api_client::put(&path, &TaskUpdate { completed }).await
}

pub async fn delete_work_order(id: String) -> Result<(), ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| db.work_orders.remove(&id)).await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}
