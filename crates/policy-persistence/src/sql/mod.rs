//! Query descriptors for the application write path
//!
//! Every write the store pipeline performs is compiled here into a SeaORM
//! `Statement`. The root insert returns the stored row (`RETURNING *`), so the
//! backend must support `RETURNING` (PostgreSQL or SQLite).
//!
//! Child inserts use `ON CONFLICT DO NOTHING` on the child table's primary
//! key, which makes resubmitting an unchanged application idempotent.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::NotSet, DbBackend, EntityTrait, QueryTrait, Set, Statement};

use crate::entity::{
    app_auto_approvals, app_countries, app_display_names, app_info, app_permissions,
    app_service_type_names, app_service_type_permissions, app_service_types,
};
use crate::model::{Application, Country, Permission, Service};

/// Child tables written after the root row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildTable {
    Countries,
    DisplayNames,
    Permissions,
    Services,
    ServiceNames,
    ServicePermissions,
    AutoApproval,
}

impl ChildTable {
    pub fn table_name(self) -> &'static str {
        match self {
            ChildTable::Countries => "app_countries",
            ChildTable::DisplayNames => "app_display_names",
            ChildTable::Permissions => "app_permissions",
            ChildTable::Services => "app_service_types",
            ChildTable::ServiceNames => "app_service_type_names",
            ChildTable::ServicePermissions => "app_service_type_permissions",
            ChildTable::AutoApproval => "app_auto_approvals",
        }
    }
}

impl std::fmt::Display for ChildTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// One queued child-table write
#[derive(Debug, Clone)]
pub struct ChildWrite {
    pub table: ChildTable,
    pub statement: Statement,
}

/// Compiles write intents into backend-specific statements
#[derive(Debug, Clone, Copy)]
pub struct QueryCompiler {
    backend: DbBackend,
}

impl QueryCompiler {
    pub fn new(backend: DbBackend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> DbBackend {
        self.backend
    }

    fn now() -> chrono::NaiveDateTime {
        chrono::Utc::now().naive_utc()
    }

    /// Insert the root row, or upsert it when the write-object carries an id.
    /// `created_ts` is left untouched on update.
    pub fn insert_app_info(&self, app: &Application) -> Statement {
        let now = Self::now();
        let model = app_info::ActiveModel {
            id: match app.id {
                Some(id) => Set(id),
                None => NotSet,
            },
            app_uuid: Set(app.uuid.clone()),
            app_short_uuid: Set(app.short_uuid.clone()),
            name: Set(app.name.clone()),
            vendor_name: Set(app.vendor_name.clone()),
            vendor_email: Set(app.vendor_email.clone()),
            version_id: Set(app.version_id),
            platform: Set(app.platform.clone()),
            platform_version: Set(app.platform_version.clone()),
            approval_status: Set(app.approval_status.clone()),
            can_background_alert: Set(app.can_background_alert),
            can_steal_focus: Set(app.can_steal_focus),
            default_hmi_level: Set(app.default_hmi_level.clone()),
            tech_email: Set(app.tech_email.clone()),
            tech_phone: Set(app.tech_phone.clone()),
            category_id: Set(app.category.id),
            created_ts: Set(now),
            updated_ts: Set(now),
        };

        let mut insert = app_info::Entity::insert(model);
        if app.id.is_some() {
            insert = insert.on_conflict(
                OnConflict::column(app_info::Column::Id)
                    .update_columns([
                        app_info::Column::AppUuid,
                        app_info::Column::AppShortUuid,
                        app_info::Column::Name,
                        app_info::Column::VendorName,
                        app_info::Column::VendorEmail,
                        app_info::Column::VersionId,
                        app_info::Column::Platform,
                        app_info::Column::PlatformVersion,
                        app_info::Column::ApprovalStatus,
                        app_info::Column::CanBackgroundAlert,
                        app_info::Column::CanStealFocus,
                        app_info::Column::DefaultHmiLevel,
                        app_info::Column::TechEmail,
                        app_info::Column::TechPhone,
                        app_info::Column::CategoryId,
                        app_info::Column::UpdatedTs,
                    ])
                    .to_owned(),
            );
        }
        QueryTrait::query(&mut insert).returning_all();
        insert.build(self.backend)
    }

    pub fn insert_app_countries(&self, countries: &[Country], app_id: i32) -> Option<Statement> {
        if countries.is_empty() {
            return None;
        }
        let models = countries.iter().map(|country| app_countries::ActiveModel {
            app_id: Set(app_id),
            country_iso: Set(country.iso.clone()),
        });
        Some(
            app_countries::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        app_countries::Column::AppId,
                        app_countries::Column::CountryIso,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .build(self.backend),
        )
    }

    pub fn insert_app_display_names(
        &self,
        display_names: &[String],
        app_id: i32,
    ) -> Option<Statement> {
        if display_names.is_empty() {
            return None;
        }
        let models = display_names
            .iter()
            .map(|text| app_display_names::ActiveModel {
                app_id: Set(app_id),
                display_text: Set(text.clone()),
            });
        Some(
            app_display_names::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        app_display_names::Column::AppId,
                        app_display_names::Column::DisplayText,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .build(self.backend),
        )
    }

    pub fn insert_app_permissions(
        &self,
        permissions: &[Permission],
        app_id: i32,
    ) -> Option<Statement> {
        if permissions.is_empty() {
            return None;
        }
        let models = permissions
            .iter()
            .map(|permission| app_permissions::ActiveModel {
                app_id: Set(app_id),
                permission_name: Set(permission.key.clone()),
                hmi_level: Set(permission.hmi_level.clone()),
            });
        Some(
            app_permissions::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        app_permissions::Column::AppId,
                        app_permissions::Column::PermissionName,
                        app_permissions::Column::HmiLevel,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .build(self.backend),
        )
    }

    pub fn insert_app_services(&self, services: &[Service], app_id: i32) -> Option<Statement> {
        if services.is_empty() {
            return None;
        }
        let models = services
            .iter()
            .map(|service| app_service_types::ActiveModel {
                app_id: Set(app_id),
                service_type_name: Set(service.name.clone()),
            });
        Some(
            app_service_types::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        app_service_types::Column::AppId,
                        app_service_types::Column::ServiceTypeName,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .build(self.backend),
        )
    }

    /// `None` when no service lists a name
    pub fn insert_app_service_names(
        &self,
        services: &[Service],
        app_id: i32,
    ) -> Option<Statement> {
        let models: Vec<app_service_type_names::ActiveModel> = services
            .iter()
            .flat_map(|service| {
                service
                    .service_names
                    .iter()
                    .map(move |service_name| app_service_type_names::ActiveModel {
                        app_id: Set(app_id),
                        service_type_name: Set(service.name.clone()),
                        service_name: Set(service_name.clone()),
                    })
            })
            .collect();
        if models.is_empty() {
            return None;
        }
        Some(
            app_service_type_names::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        app_service_type_names::Column::AppId,
                        app_service_type_names::Column::ServiceTypeName,
                        app_service_type_names::Column::ServiceName,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .build(self.backend),
        )
    }

    /// `None` when no service carries a permission
    pub fn insert_standard_app_service_permissions(
        &self,
        services: &[Service],
        app_id: i32,
    ) -> Option<Statement> {
        let models: Vec<app_service_type_permissions::ActiveModel> = services
            .iter()
            .flat_map(|service| {
                service.permissions.iter().map(move |permission| {
                    app_service_type_permissions::ActiveModel {
                        app_id: Set(app_id),
                        service_type_name: Set(service.name.clone()),
                        permission_name: Set(permission.name.clone()),
                        function_id: Set(permission.function_id),
                        display_name: Set(permission.display_name.clone()),
                        is_selected: Set(permission.is_selected),
                    }
                })
            })
            .collect();
        if models.is_empty() {
            return None;
        }
        Some(
            app_service_type_permissions::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        app_service_type_permissions::Column::AppId,
                        app_service_type_permissions::Column::ServiceTypeName,
                        app_service_type_permissions::Column::PermissionName,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .build(self.backend),
        )
    }

    /// Auto-approval is keyed by the external uuid of the write-object
    pub fn insert_app_auto_approval(&self, app: &Application) -> Statement {
        let model = app_auto_approvals::ActiveModel {
            app_uuid: Set(app.uuid.clone()),
            created_ts: Set(Self::now()),
        };
        app_auto_approvals::Entity::insert(model)
            .on_conflict(
                OnConflict::column(app_auto_approvals::Column::AppUuid)
                    .do_nothing()
                    .to_owned(),
            )
            .build(self.backend)
    }

    /// Queue the child writes for a stored root row.
    ///
    /// A write is queued only when its collection is non-empty; services
    /// queue up to three writes, and auto-approval only when enabled.
    pub fn child_writes(&self, app: &Application, app_id: i32) -> Vec<ChildWrite> {
        let mut writes = Vec::new();
        let mut push = |table: ChildTable, statement: Option<Statement>| {
            if let Some(statement) = statement {
                writes.push(ChildWrite { table, statement });
            }
        };

        if !app.countries.is_empty() {
            push(
                ChildTable::Countries,
                self.insert_app_countries(&app.countries, app_id),
            );
        }
        if !app.display_names.is_empty() {
            push(
                ChildTable::DisplayNames,
                self.insert_app_display_names(&app.display_names, app_id),
            );
        }
        if !app.permissions.is_empty() {
            push(
                ChildTable::Permissions,
                self.insert_app_permissions(&app.permissions, app_id),
            );
        }
        if !app.services.is_empty() {
            push(
                ChildTable::Services,
                self.insert_app_services(&app.services, app_id),
            );
            push(
                ChildTable::ServiceNames,
                self.insert_app_service_names(&app.services, app_id),
            );
            push(
                ChildTable::ServicePermissions,
                self.insert_standard_app_service_permissions(&app.services, app_id),
            );
        }
        if app.is_auto_approved_enabled {
            push(
                ChildTable::AutoApproval,
                Some(self.insert_app_auto_approval(app)),
            );
        }

        writes
    }
}
