//! Checklist business logic.

use crate::{
    core::wedding::get_wedding,
    entities::{Task, task},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Loads a task or fails with `TaskNotFound`.
pub async fn get_task<C>(db: &C, task_id: i64) -> Result<task::Model>
where
    C: ConnectionTrait,
{
    Task::find_by_id(task_id)
        .one(db)
        .await?
        .ok_or(Error::TaskNotFound { id: task_id })
}

/// All tasks of a wedding, in creation order.
pub async fn list_tasks<C>(db: &C, wedding_id: i64) -> Result<Vec<task::Model>>
where
    C: ConnectionTrait,
{
    Task::find()
        .filter(task::Column::WeddingId.eq(wedding_id))
        .order_by_asc(task::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds an open task. A blank description adds nothing and returns `None`.
pub async fn add_task(
    db: &DatabaseConnection,
    wedding_id: i64,
    description: &str,
) -> Result<Option<task::Model>> {
    get_wedding(db, wedding_id).await?;
    if description.trim().is_empty() {
        return Ok(None);
    }

    let task = task::ActiveModel {
        wedding_id: Set(wedding_id),
        description: Set(description.to_string()),
        is_done: Set(false),
        ..Default::default()
    };
    let task = task.insert(db).await?;
    debug!("Added task {} to wedding {wedding_id}", task.id);
    Ok(Some(task))
}

/// Flips a task between open and done.
pub async fn toggle_task(db: &DatabaseConnection, task_id: i64) -> Result<task::Model> {
    let task = get_task(db, task_id).await?;
    let is_done = !task.is_done;
    let mut active: task::ActiveModel = task.into();
    active.is_done = Set(is_done);
    active.update(db).await.map_err(Into::into)
}

/// Removes a task.
pub async fn delete_task(db: &DatabaseConnection, task_id: i64) -> Result<()> {
    let task = get_task(db, task_id).await?;
    task.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_task_ignores_blank() -> Result<()> {
        let (db, _owner, wedding) = setup_with_wedding().await?;

        assert!(add_task(&db, wedding.id, "   ").await?.is_none());
        let task = add_task(&db, wedding.id, "Order cake").await?.unwrap();
        assert_eq!(task.description, "Order cake");
        assert!(!task.is_done);
        assert_eq!(list_tasks(&db, wedding.id).await?, vec![task]);
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_and_delete() -> Result<()> {
        let (db, _owner, wedding) = setup_with_wedding().await?;
        let task = add_task(&db, wedding.id, "Send invitations").await?.unwrap();

        assert!(toggle_task(&db, task.id).await?.is_done);
        assert!(!toggle_task(&db, task.id).await?.is_done);

        delete_task(&db, task.id).await?;
        assert!(list_tasks(&db, wedding.id).await?.is_empty());
        assert!(matches!(
            toggle_task(&db, task.id).await,
            Err(Error::TaskNotFound { .. })
        ));
        Ok(())
    }
}
