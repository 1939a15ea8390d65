use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::PlanStore;
use crate::error::AppError;
use crate::models::{Plan, PlanPatch};

const PLAN_COLUMNS: &str = "id, open_id, title, detail, is_finish, create_time, update_time, organize, closing_date, step_list, repeat";

pub struct SqlitePlanStore {
    db: SqlitePool,
}

impl SqlitePlanStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Plan>, AppError> {
        let row = sqlx::query_as::<_, PlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plan_list WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(PlanRow::into_plan).transpose()
    }
}

/// Raw table row; `step_list` and `repeat` are JSON text columns.
#[derive(sqlx::FromRow)]
struct PlanRow {
    id: String,
    open_id: String,
    title: String,
    detail: String,
    is_finish: bool,
    create_time: i64,
    update_time: i64,
    organize: String,
    closing_date: i64,
    step_list: String,
    repeat: String,
}

impl PlanRow {
    fn into_plan(self) -> Result<Plan, AppError> {
        Ok(Plan {
            id: self.id,
            open_id: self.open_id,
            title: self.title,
            detail: self.detail,
            is_finish: self.is_finish,
            create_time: self.create_time,
            update_time: self.update_time,
            organize: self.organize,
            closing_date: self.closing_date,
            step_list: serde_json::from_str(&self.step_list)?,
            repeat: serde_json::from_str(&self.repeat)?,
        })
    }
}

#[async_trait]
impl PlanStore for SqlitePlanStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }

    async fn find_by_owner(&self, open_id: &str) -> Result<Vec<Plan>, AppError> {
        let rows = sqlx::query_as::<_, PlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plan_list WHERE open_id = ? ORDER BY create_time"
        ))
        .bind(open_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(PlanRow::into_plan).collect()
    }

    async fn insert_many(&self, plans: &[Plan]) -> Result<Vec<String>, AppError> {
        let mut tx = self.db.begin().await?;
        let mut ids = Vec::with_capacity(plans.len());

        for plan in plans {
            let id = Uuid::new_v4().to_string();
            let step_list = serde_json::to_string(&plan.step_list)?;
            let repeat = serde_json::to_string(&plan.repeat)?;

            sqlx::query(
                r#"
                INSERT INTO plan_list
                    (id, open_id, title, detail, is_finish, create_time, update_time,
                    organize, closing_date, step_list, repeat)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id)
            .bind(&plan.open_id)
            .bind(&plan.title)
            .bind(&plan.detail)
            .bind(plan.is_finish)
            .bind(plan.create_time)
            .bind(plan.update_time)
            .bind(&plan.organize)
            .bind(plan.closing_date)
            .bind(&step_list)
            .bind(&repeat)
            .execute(&mut *tx)
            .await?;

            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn update_by_id(&self, id: &str, patch: &PlanPatch) -> Result<u64, AppError> {
        let Some(mut current) = self.find_by_id(id).await? else {
            return Ok(0);
        };

        if let Some(open_id) = &patch.open_id {
            current.open_id = open_id.clone();
        }
        if let Some(title) = &patch.title {
            current.title = title.clone();
        }
        if let Some(detail) = &patch.detail {
            current.detail = detail.clone();
        }
        if let Some(is_finish) = patch.is_finish {
            current.is_finish = is_finish;
        }
        if let Some(update_time) = patch.update_time {
            current.update_time = update_time;
        }
        if let Some(organize) = &patch.organize {
            current.organize = organize.clone();
        }
        if let Some(closing_date) = patch.closing_date {
            current.closing_date = closing_date;
        }
        if let Some(step_list) = &patch.step_list {
            current.step_list = step_list.clone();
        }
        if let Some(repeat) = &patch.repeat {
            current.repeat = repeat.clone();
        }

        let step_list = serde_json::to_string(&current.step_list)?;
        let repeat = serde_json::to_string(&current.repeat)?;

        let result = sqlx::query(
            r#"
            UPDATE plan_list
            SET open_id = ?, title = ?, detail = ?, is_finish = ?, update_time = ?,
                organize = ?, closing_date = ?, step_list = ?, repeat = ?
            WHERE id = ?
            "#,
        )
        .bind(&current.open_id)
        .bind(&current.title)
        .bind(&current.detail)
        .bind(current.is_finish)
        .bind(current.update_time)
        .bind(&current.organize)
        .bind(current.closing_date)
        .bind(&step_list)
        .bind(&repeat)
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM plan_list WHERE id IN ({placeholders})");

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let result = query.execute(&self.db).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::*;

    async fn setup_test_store() -> SqlitePlanStore {
        let pool = SqlitePool::connect("sqlite://:memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        SqlitePlanStore::new(pool)
    }

    fn sample_plan(open_id: &str, title: &str) -> Plan {
        Plan {
            id: String::new(),
            open_id: open_id.to_string(),
            title: title.to_string(),
            detail: String::new(),
            is_finish: false,
            create_time: 1700000000000,
            update_time: 1700000000000,
            organize: "normal".to_string(),
            closing_date: 0,
            step_list: Vec::new(),
            repeat: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_many_and_find_by_owner() {
        let store = setup_test_store().await;

        let mut with_steps = sample_plan("user-a", "买菜");
        with_steps.step_list = vec![json!({"title": "列清单", "done": false})];

        let mut later = sample_plan("user-a", "健身");
        later.create_time = 1700000001000;
        later.update_time = 1700000001000;

        let plans = vec![with_steps, later, sample_plan("user-b", "读书")];

        let ids = store.insert_many(&plans).await.expect("Failed to insert plans");
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);

        let found = store
            .find_by_owner("user-a")
            .await
            .expect("Failed to fetch plans");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, ids[0]);
        assert_eq!(found[0].title, "买菜");
        assert_eq!(found[0].step_list, vec![json!({"title": "列清单", "done": false})]);
        assert!(found[0].repeat.is_empty());
    }

    #[tokio::test]
    async fn test_update_by_id_writes_only_present_fields() {
        let store = setup_test_store().await;

        let mut plan = sample_plan("user-a", "买菜");
        plan.detail = "晚饭的材料".to_string();
        let ids = store.insert_many(&[plan]).await.expect("Failed to insert plan");

        let patch = PlanPatch {
            title: Some("买菜和水果".to_string()),
            is_finish: Some(true),
            update_time: Some(1700000005000),
            ..PlanPatch::default()
        };

        let modified = store
            .update_by_id(&ids[0], &patch)
            .await
            .expect("Failed to update plan");
        assert_eq!(modified, 1);

        let found = store
            .find_by_owner("user-a")
            .await
            .expect("Failed to fetch plans");
        assert_eq!(found[0].title, "买菜和水果");
        assert!(found[0].is_finish);
        assert_eq!(found[0].update_time, 1700000005000);
        // untouched fields keep their values
        assert_eq!(found[0].detail, "晚饭的材料");
        assert_eq!(found[0].create_time, 1700000000000);
    }

    #[tokio::test]
    async fn test_update_by_id_unknown_id_modifies_nothing() {
        let store = setup_test_store().await;

        let patch = PlanPatch {
            title: Some("不存在".to_string()),
            ..PlanPatch::default()
        };

        let modified = store
            .update_by_id("no-such-id", &patch)
            .await
            .expect("Failed to run update");
        assert_eq!(modified, 0);
    }

    #[tokio::test]
    async fn test_delete_by_ids_tolerates_unknown_ids() {
        let store = setup_test_store().await;

        let plans = vec![
            sample_plan("user-a", "买菜"),
            sample_plan("user-a", "健身"),
            sample_plan("user-a", "读书"),
        ];
        let ids = store.insert_many(&plans).await.expect("Failed to insert plans");

        let removed = store
            .delete_by_ids(&[ids[0].clone(), ids[2].clone(), "no-such-id".to_string()])
            .await
            .expect("Failed to delete plans");
        assert_eq!(removed, 2);

        let found = store
            .find_by_owner("user-a")
            .await
            .expect("Failed to fetch plans");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ids[1]);
    }

    #[tokio::test]
    async fn test_delete_by_ids_empty_set_is_noop() {
        let store = setup_test_store().await;

        let removed = store.delete_by_ids(&[]).await.expect("Failed to run delete");
        assert_eq!(removed, 0);
    }
}
