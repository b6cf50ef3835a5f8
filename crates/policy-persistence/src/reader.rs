//! Application read path
//!
//! Runs one query per row set and hands the results to [`aggregate`]. The
//! base query runs first; the child queries are restricted to the ids it
//! selected, so every child row has its parent in the batch, and run
//! concurrently.

use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use tracing::debug;

use crate::aggregate::aggregate;
use crate::client::DatabaseClient;
use crate::entity::{
    app_auto_approvals, app_blacklist, app_countries, app_display_names, app_info,
    app_permissions, app_service_type_names, app_service_type_permissions, app_service_types,
    categories, countries, permissions, service_types,
};
use crate::error::LoadError;
use crate::model::{AppFilter, Application};
use crate::rows::{
    AppRowSets, AppUuidRow, CountryRow, DisplayNameRow, PermissionRow, ServiceTypeNameRow,
    ServiceTypePermissionRow, ServiceTypeRow,
};

/// Loads nested applications from the database
#[derive(Clone, Debug)]
pub struct ApplicationReader {
    client: DatabaseClient,
}

impl ApplicationReader {
    pub fn new(client: DatabaseClient) -> Self {
        Self { client }
    }

    /// All applications matching `filter`, ordered by id
    pub async fn find_apps(&self, filter: &AppFilter) -> Result<Vec<Application>, LoadError> {
        let rows = self.load_row_sets(filter).await?;
        let apps = aggregate(rows)?;
        debug!(count = apps.len(), "Loaded applications");
        Ok(apps)
    }

    /// Newest stored version of the application with this uuid
    pub async fn find_app(&self, uuid: &str) -> Result<Option<Application>, LoadError> {
        let mut apps = self.find_apps(&AppFilter::by_uuid(uuid)).await?;
        Ok(apps.pop())
    }

    async fn load_row_sets(&self, filter: &AppFilter) -> Result<AppRowSets, LoadError> {
        let db = self.client.db();

        let mut base_query = app_info::Entity::find();
        if let Some(id) = filter.id {
            base_query = base_query.filter(app_info::Column::Id.eq(id));
        }
        if let Some(uuid) = &filter.uuid {
            base_query = base_query.filter(app_info::Column::AppUuid.eq(uuid.as_str()));
        }
        if let Some(status) = filter.approval_status {
            base_query = base_query.filter(app_info::Column::ApprovalStatus.eq(status.as_str()));
        }
        let base = base_query
            .order_by_asc(app_info::Column::Id)
            .all(db)
            .await?;

        if base.is_empty() {
            return Ok(AppRowSets::default());
        }

        let ids: Vec<i32> = base.iter().map(|app| app.id).collect();
        let uuids: Vec<String> = base.iter().map(|app| app.app_uuid.clone()).collect();

        let countries_query = app_countries::Entity::find()
            .select_only()
            .column_as(app_countries::Column::AppId, "id")
            .column_as(app_countries::Column::CountryIso, "country_iso")
            .column_as(countries::Column::Name, "name")
            .join(JoinType::LeftJoin, app_countries::Relation::Countries.def())
            .filter(app_countries::Column::AppId.is_in(ids.clone()))
            .order_by_asc(app_countries::Column::CountryIso)
            .into_model::<CountryRow>()
            .all(db);

        let display_names_query = app_display_names::Entity::find()
            .select_only()
            .column_as(app_display_names::Column::AppId, "id")
            .column_as(app_display_names::Column::DisplayText, "display_text")
            .filter(app_display_names::Column::AppId.is_in(ids.clone()))
            .order_by_asc(app_display_names::Column::DisplayText)
            .into_model::<DisplayNameRow>()
            .all(db);

        let permissions_query = app_permissions::Entity::find()
            .select_only()
            .column_as(app_permissions::Column::AppId, "id")
            .column_as(app_permissions::Column::PermissionName, "permission_name")
            .column_as(app_permissions::Column::HmiLevel, "hmi_level")
            .column_as(permissions::Column::Type, "permission_type")
            .join(
                JoinType::LeftJoin,
                app_permissions::Relation::Permissions.def(),
            )
            .filter(app_permissions::Column::AppId.is_in(ids.clone()))
            .order_by_asc(app_permissions::Column::PermissionName)
            .order_by_asc(app_permissions::Column::HmiLevel)
            .into_model::<PermissionRow>()
            .all(db);

        let categories_query = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(db);

        let service_types_query = app_service_types::Entity::find()
            .select_only()
            .column_as(app_service_types::Column::AppId, "app_id")
            .column_as(
                app_service_types::Column::ServiceTypeName,
                "service_type_name",
            )
            .column_as(service_types::Column::DisplayName, "display_name")
            .join(
                JoinType::LeftJoin,
                app_service_types::Relation::ServiceTypes.def(),
            )
            .filter(app_service_types::Column::AppId.is_in(ids.clone()))
            .order_by_asc(app_service_types::Column::ServiceTypeName)
            .into_model::<ServiceTypeRow>()
            .all(db);

        let service_type_names_query = app_service_type_names::Entity::find()
            .select_only()
            .column_as(app_service_type_names::Column::AppId, "app_id")
            .column_as(
                app_service_type_names::Column::ServiceTypeName,
                "service_type_name",
            )
            .column_as(app_service_type_names::Column::ServiceName, "service_name")
            .filter(app_service_type_names::Column::AppId.is_in(ids.clone()))
            .order_by_asc(app_service_type_names::Column::ServiceName)
            .into_model::<ServiceTypeNameRow>()
            .all(db);

        let service_type_permissions_query = app_service_type_permissions::Entity::find()
            .select_only()
            .column_as(app_service_type_permissions::Column::AppId, "app_id")
            .column_as(
                app_service_type_permissions::Column::ServiceTypeName,
                "service_type_name",
            )
            .column_as(
                app_service_type_permissions::Column::FunctionId,
                "function_id",
            )
            .column_as(
                app_service_type_permissions::Column::DisplayName,
                "display_name",
            )
            .column_as(app_service_type_permissions::Column::PermissionName, "name")
            .column_as(
                app_service_type_permissions::Column::IsSelected,
                "is_selected",
            )
            .filter(app_service_type_permissions::Column::AppId.is_in(ids))
            .order_by_asc(app_service_type_permissions::Column::PermissionName)
            .into_model::<ServiceTypePermissionRow>()
            .all(db);

        let auto_approvals_query = app_auto_approvals::Entity::find()
            .select_only()
            .column_as(app_auto_approvals::Column::AppUuid, "app_uuid")
            .filter(app_auto_approvals::Column::AppUuid.is_in(uuids.clone()))
            .into_model::<AppUuidRow>()
            .all(db);

        let blacklist_query = app_blacklist::Entity::find()
            .select_only()
            .column_as(app_blacklist::Column::AppUuid, "app_uuid")
            .filter(app_blacklist::Column::AppUuid.is_in(uuids))
            .into_model::<AppUuidRow>()
            .all(db);

        let (
            countries,
            display_names,
            permissions,
            categories,
            service_types,
            service_type_names,
            service_type_permissions,
            auto_approvals,
            blacklist,
        ) = tokio::try_join!(
            countries_query,
            display_names_query,
            permissions_query,
            categories_query,
            service_types_query,
            service_type_names_query,
            service_type_permissions_query,
            auto_approvals_query,
            blacklist_query,
        )?;

        Ok(AppRowSets {
            base,
            countries,
            display_names,
            permissions,
            categories,
            service_types,
            service_type_names,
            service_type_permissions,
            auto_approvals,
            blacklist,
        })
    }
}
