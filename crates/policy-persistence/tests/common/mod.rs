// Shared fixtures for the persistence integration tests
// In-memory SQLite with tables created from the entities and lookups seeded.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use policy_persistence::entity::{
    app_auto_approvals, app_blacklist, app_countries, app_display_names, app_info,
    app_permissions, app_service_type_names, app_service_type_permissions, app_service_types,
    categories, countries, permissions, service_types,
};
use policy_persistence::sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait,
    PaginatorTrait, Schema, Set,
};
use policy_persistence::{
    ApprovalVendorSync, Application, Category, Country, Permission, Service, ServicePermission,
    StoredApp, SyncError,
};

pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    let tables = [
        schema.create_table_from_entity(categories::Entity),
        schema.create_table_from_entity(countries::Entity),
        schema.create_table_from_entity(permissions::Entity),
        schema.create_table_from_entity(service_types::Entity),
        schema.create_table_from_entity(app_info::Entity),
        schema.create_table_from_entity(app_countries::Entity),
        schema.create_table_from_entity(app_display_names::Entity),
        schema.create_table_from_entity(app_permissions::Entity),
        schema.create_table_from_entity(app_service_types::Entity),
        schema.create_table_from_entity(app_service_type_names::Entity),
        schema.create_table_from_entity(app_service_type_permissions::Entity),
        schema.create_table_from_entity(app_auto_approvals::Entity),
        schema.create_table_from_entity(app_blacklist::Entity),
    ];
    for table in &tables {
        db.execute(db.get_database_backend().build(table))
            .await
            .unwrap();
    }

    seed_lookups(&db).await;
    db
}

async fn seed_lookups(db: &DatabaseConnection) {
    categories::Entity::insert_many([
        categories::ActiveModel {
            id: Set(5),
            display_name: Set("Media".to_string()),
        },
        categories::ActiveModel {
            id: Set(7),
            display_name: Set("Navigation".to_string()),
        },
    ])
    .exec(db)
    .await
    .unwrap();

    countries::Entity::insert_many([
        countries::ActiveModel {
            iso: Set("US".to_string()),
            name: Set("United States".to_string()),
        },
        countries::ActiveModel {
            iso: Set("CA".to_string()),
            name: Set("Canada".to_string()),
        },
    ])
    .exec(db)
    .await
    .unwrap();

    permissions::Entity::insert_many([
        permissions::ActiveModel {
            name: Set("GetVehicleData".to_string()),
            r#type: Set(Some("RPC".to_string())),
        },
        permissions::ActiveModel {
            name: Set("ButtonPress".to_string()),
            r#type: Set(Some("RPC".to_string())),
        },
    ])
    .exec(db)
    .await
    .unwrap();

    service_types::Entity::insert_many([
        service_types::ActiveModel {
            name: Set("MEDIA".to_string()),
            display_name: Set("Media".to_string()),
        },
        service_types::ActiveModel {
            name: Set("WEATHER".to_string()),
            display_name: Set("Weather".to_string()),
        },
    ])
    .exec(db)
    .await
    .unwrap();
}

/// Minimal write-object: no child collections, no version id
pub fn bare_app(uuid: &str) -> Application {
    Application {
        uuid: uuid.to_string(),
        name: "Radio".to_string(),
        vendor_name: "Acme".to_string(),
        platform: "ANDROID".to_string(),
        approval_status: "PENDING".to_string(),
        default_hmi_level: "HMI_NONE".to_string(),
        category: Category {
            id: 5,
            display_name: None,
        },
        ..Default::default()
    }
}

/// Write-object with every child collection populated
pub fn full_app(uuid: &str) -> Application {
    let mut app = bare_app(uuid);
    app.short_uuid = Some("abc123".to_string());
    app.countries = vec![
        Country {
            iso: "CA".to_string(),
            name: Some("Canada".to_string()),
        },
        Country {
            iso: "US".to_string(),
            name: Some("United States".to_string()),
        },
    ];
    app.display_names = vec!["My Radio".to_string(), "Radio".to_string()];
    app.permissions = vec![Permission {
        key: "GetVehicleData".to_string(),
        hmi_level: "HMI_FULL".to_string(),
        permission_type: Some("RPC".to_string()),
    }];
    app.services = vec![Service {
        name: "MEDIA".to_string(),
        display_name: Some("Media".to_string()),
        service_names: vec!["Player".to_string(), "Podcasts".to_string()],
        permissions: vec![ServicePermission {
            app_id: None,
            function_id: Some(32784),
            display_name: Some("Button Press".to_string()),
            name: "ButtonPress".to_string(),
            is_selected: true,
        }],
    }];
    app.is_auto_approved_enabled = true;
    app
}

/// Row counts for the root table and every child table
pub async fn table_counts(db: &DatabaseConnection) -> [u64; 8] {
    [
        app_info::Entity::find().count(db).await.unwrap(),
        app_countries::Entity::find().count(db).await.unwrap(),
        app_display_names::Entity::find().count(db).await.unwrap(),
        app_permissions::Entity::find().count(db).await.unwrap(),
        app_service_types::Entity::find().count(db).await.unwrap(),
        app_service_type_names::Entity::find().count(db).await.unwrap(),
        app_service_type_permissions::Entity::find()
            .count(db)
            .await
            .unwrap(),
        app_auto_approvals::Entity::find().count(db).await.unwrap(),
    ]
}

/// Approval vendor double that records every call
#[derive(Default)]
pub struct RecordingVendor {
    pub calls: Mutex<Vec<Vec<StoredApp>>>,
    pub fail: bool,
}

impl RecordingVendor {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<StoredApp>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApprovalVendorSync for RecordingVendor {
    async fn set_application_approval_vendor(
        &self,
        records: &[StoredApp],
    ) -> Result<(), SyncError> {
        self.calls.lock().unwrap().push(records.to_vec());
        if self.fail {
            return Err(SyncError::Rejected {
                status: 503,
                body: "vendor unavailable".to_string(),
            });
        }
        Ok(())
    }
}
