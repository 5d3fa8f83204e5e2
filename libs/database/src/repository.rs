use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait,
};
use std::marker::PhantomData;

/// Primary-key CRUD shared by the SeaORM adapters of the domain crates.
///
/// Anything beyond single-row access (filters, ordering, joins) is written
/// against [`BaseRepository::db`] by the adapter itself.
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> BaseRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    /// Update the columns set on `model`; fails with `DbErr::RecordNotUpdated`
    /// when no row matches its primary key.
    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    pub async fn find_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).one(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveValue::Set, DatabaseBackend, MockDatabase};

    mod widget {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "widgets")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub name: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn gear() -> widget::Model {
        widget::Model {
            id: 1,
            name: "gear".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_returns_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![gear()]])
            .into_connection();
        let repo = BaseRepository::<widget::Entity>::new(db);

        let found = repo.find_by_id(1).await.unwrap();
        assert_eq!(found, Some(gear()));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<widget::Model>::new()])
            .into_connection();
        let repo = BaseRepository::<widget::Entity>::new(db);

        assert_eq!(repo.find_by_id(9).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![gear()]])
            .into_connection();
        let repo = BaseRepository::<widget::Entity>::new(db);

        let stored = repo
            .insert(widget::ActiveModel {
                name: Set("gear".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(stored.id, 1);
        assert_eq!(stored.name, "gear");
    }
}
