//! Flat-to-nested reconstruction of applications
//!
//! Takes the parallel row sets returned by the read queries and rebuilds one
//! `Application` per base row. Pure: no I/O and no shared state, so it is safe
//! to call concurrently on independent batches.
//!
//! Ordering: applications are emitted in the order their id was first seen in
//! the base row set, never in map iteration order.

use std::collections::{HashMap, HashSet};

use crate::error::AggregateError;
use crate::model::{Application, Category, Country, Permission, Service, ServicePermission};
use crate::rows::{AppBaseRow, AppRowSets, ServiceTypePermissionRow};

/// Service-type rows are matched to their names and permissions by
/// (owning application, service-type name).
type ServiceTypeKey = (i32, String);

/// Rebuild nested applications from flat row sets.
///
/// A child row whose owning id is missing from `rows.base` is a caller bug and
/// fails with [`AggregateError::MissingParent`]. A base row repeated for the
/// same id replaces the earlier record but keeps its first-seen position.
pub fn aggregate(rows: AppRowSets) -> Result<Vec<Application>, AggregateError> {
    let AppRowSets {
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
    } = rows;

    let categories: HashMap<i32, String> = categories
        .into_iter()
        .map(|row| (row.id, row.display_name))
        .collect();
    let auto_approved: HashSet<String> =
        auto_approvals.into_iter().map(|row| row.app_uuid).collect();
    let blacklisted: HashSet<String> = blacklist.into_iter().map(|row| row.app_uuid).collect();

    let mut order: Vec<i32> = Vec::with_capacity(base.len());
    let mut apps: HashMap<i32, Application> = HashMap::with_capacity(base.len());
    for row in base {
        let id = row.id;
        let app = from_base_row(row, &categories, &auto_approved, &blacklisted);
        if apps.insert(id, app).is_none() {
            order.push(id);
        }
    }

    for row in countries {
        owner(&mut apps, row.id, "countries")?.countries.push(Country {
            iso: row.country_iso,
            name: row.name,
        });
    }

    for row in display_names {
        owner(&mut apps, row.id, "display_names")?
            .display_names
            .push(row.display_text);
    }

    for row in permissions {
        owner(&mut apps, row.id, "permissions")?
            .permissions
            .push(Permission {
                key: row.permission_name,
                hmi_level: row.hmi_level,
                permission_type: row.permission_type,
            });
    }

    let mut names_by_type: HashMap<ServiceTypeKey, Vec<String>> = HashMap::new();
    for row in service_type_names {
        names_by_type
            .entry((row.app_id, row.service_type_name))
            .or_default()
            .push(row.service_name);
    }

    let mut permissions_by_type: HashMap<ServiceTypeKey, Vec<ServiceTypePermissionRow>> =
        HashMap::new();
    for row in service_type_permissions {
        permissions_by_type
            .entry((row.app_id, row.service_type_name.clone()))
            .or_default()
            .push(row);
    }

    for row in service_types {
        let key = (row.app_id, row.service_type_name);
        let service_names = names_by_type.get(&key).cloned().unwrap_or_default();
        let permissions = permissions_by_type
            .get(&key)
            .map(|rows| {
                rows.iter()
                    .map(|perm| ServicePermission {
                        // owner comes from the service-type row
                        app_id: Some(row.app_id),
                        function_id: perm.function_id,
                        display_name: perm.display_name.clone(),
                        name: perm.name.clone(),
                        is_selected: perm.is_selected,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let (app_id, name) = key;
        owner(&mut apps, app_id, "services")?.services.push(Service {
            name,
            display_name: row.display_name,
            service_names,
            permissions,
        });
    }

    Ok(order
        .into_iter()
        .filter_map(|id| apps.remove(&id))
        .collect())
}

fn owner<'a>(
    apps: &'a mut HashMap<i32, Application>,
    app_id: i32,
    collection: &'static str,
) -> Result<&'a mut Application, AggregateError> {
    apps.get_mut(&app_id)
        .ok_or(AggregateError::MissingParent { collection, app_id })
}

fn from_base_row(
    row: AppBaseRow,
    categories: &HashMap<i32, String>,
    auto_approved: &HashSet<String>,
    blacklisted: &HashSet<String>,
) -> Application {
    Application {
        id: Some(row.id),
        is_auto_approved_enabled: auto_approved.contains(&row.app_uuid),
        is_blacklisted: blacklisted.contains(&row.app_uuid),
        category: Category {
            id: row.category_id,
            display_name: categories.get(&row.category_id).cloned(),
        },
        uuid: row.app_uuid,
        short_uuid: row.app_short_uuid,
        name: row.name,
        vendor_name: row.vendor_name,
        vendor_email: row.vendor_email,
        version_id: row.version_id,
        platform: row.platform,
        platform_version: row.platform_version,
        approval_status: row.approval_status,
        can_background_alert: row.can_background_alert,
        can_steal_focus: row.can_steal_focus,
        default_hmi_level: row.default_hmi_level,
        tech_email: row.tech_email,
        tech_phone: row.tech_phone,
        created_ts: Some(row.created_ts),
        updated_ts: Some(row.updated_ts),
        countries: Vec::new(),
        display_names: Vec::new(),
        permissions: Vec::new(),
        services: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{
        AppUuidRow, CategoryRow, CountryRow, DisplayNameRow, PermissionRow, ServiceTypeNameRow,
        ServiceTypeRow,
    };
    use chrono::NaiveDateTime;
    use proptest::prelude::*;

    fn base_row(id: i32, uuid: &str, category_id: i32) -> AppBaseRow {
        AppBaseRow {
            id,
            app_uuid: uuid.to_string(),
            app_short_uuid: None,
            name: format!("app-{}", id),
            vendor_name: "Acme".to_string(),
            vendor_email: None,
            version_id: None,
            platform: "ANDROID".to_string(),
            platform_version: None,
            approval_status: "PENDING".to_string(),
            can_background_alert: false,
            can_steal_focus: false,
            default_hmi_level: "HMI_NONE".to_string(),
            tech_email: None,
            tech_phone: None,
            category_id,
            created_ts: NaiveDateTime::default(),
            updated_ts: NaiveDateTime::default(),
        }
    }

    fn service_type(app_id: i32, name: &str) -> ServiceTypeRow {
        ServiceTypeRow {
            app_id,
            service_type_name: name.to_string(),
            display_name: Some(format!("{} service", name)),
        }
    }

    fn service_type_name(app_id: i32, type_name: &str, service_name: &str) -> ServiceTypeNameRow {
        ServiceTypeNameRow {
            app_id,
            service_type_name: type_name.to_string(),
            service_name: service_name.to_string(),
        }
    }

    #[test]
    fn test_single_auto_approved_app() {
        let rows = AppRowSets {
            base: vec![base_row(1, "u1", 5)],
            categories: vec![CategoryRow {
                id: 5,
                display_name: "Media".to_string(),
            }],
            auto_approvals: vec![AppUuidRow::new("u1")],
            ..Default::default()
        };

        let apps = aggregate(rows).unwrap();

        assert_eq!(apps.len(), 1);
        let app = &apps[0];
        assert_eq!(app.id, Some(1));
        assert_eq!(app.uuid, "u1");
        assert_eq!(
            app.category,
            Category {
                id: 5,
                display_name: Some("Media".to_string())
            }
        );
        assert!(app.is_auto_approved_enabled);
        assert!(!app.is_blacklisted);
        assert!(app.countries.is_empty());
        assert!(app.display_names.is_empty());
        assert!(app.permissions.is_empty());
        assert!(app.services.is_empty());

        let value = serde_json::to_value(app).unwrap();
        assert_eq!(value["uuid"], "u1");
        assert!(value.get("app_uuid").is_none());
        assert!(value.get("app_short_uuid").is_none());
        assert_eq!(value["category"]["display_name"], "Media");
        assert_eq!(value["countries"], serde_json::json!([]));
    }

    #[test]
    fn test_unknown_category_has_null_display_name() {
        let apps = aggregate(AppRowSets {
            base: vec![base_row(1, "u1", 42)],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(apps[0].category.id, 42);
        assert_eq!(apps[0].category.display_name, None);
        let value = serde_json::to_value(&apps[0]).unwrap();
        assert!(value["category"]["display_name"].is_null());
    }

    #[test]
    fn test_membership_keyed_by_uuid_not_id() {
        let rows = AppRowSets {
            base: vec![base_row(1, "u1", 5), base_row(2, "u2", 5)],
            // "1" is an id, not a uuid; it must not match app 1
            auto_approvals: vec![AppUuidRow::new("1")],
            blacklist: vec![AppUuidRow::new("u2")],
            ..Default::default()
        };

        let apps = aggregate(rows).unwrap();

        assert!(!apps[0].is_auto_approved_enabled);
        assert!(!apps[0].is_blacklisted);
        assert!(!apps[1].is_auto_approved_enabled);
        assert!(apps[1].is_blacklisted);
    }

    #[test]
    fn test_child_rows_grouped_by_owner() {
        let rows = AppRowSets {
            base: vec![base_row(2, "u2", 5), base_row(1, "u1", 5)],
            countries: vec![
                CountryRow {
                    id: 1,
                    country_iso: "US".to_string(),
                    name: Some("United States".to_string()),
                },
                CountryRow {
                    id: 2,
                    country_iso: "CA".to_string(),
                    name: None,
                },
                CountryRow {
                    id: 1,
                    country_iso: "MX".to_string(),
                    name: Some("Mexico".to_string()),
                },
            ],
            display_names: vec![DisplayNameRow {
                id: 2,
                display_text: "Radio".to_string(),
            }],
            permissions: vec![PermissionRow {
                id: 1,
                permission_name: "GetVehicleData".to_string(),
                hmi_level: "HMI_FULL".to_string(),
                permission_type: Some("RPC".to_string()),
            }],
            ..Default::default()
        };

        let apps = aggregate(rows).unwrap();

        assert_eq!(apps[0].id, Some(2));
        assert_eq!(apps[0].countries.len(), 1);
        assert_eq!(apps[0].countries[0].iso, "CA");
        assert_eq!(apps[0].display_names, vec!["Radio".to_string()]);
        assert!(apps[0].permissions.is_empty());

        assert_eq!(apps[1].id, Some(1));
        let isos: Vec<&str> = apps[1].countries.iter().map(|c| c.iso.as_str()).collect();
        assert_eq!(isos, vec!["US", "MX"]);
        assert!(apps[1].display_names.is_empty());
        assert_eq!(
            apps[1].permissions,
            vec![Permission {
                key: "GetVehicleData".to_string(),
                hmi_level: "HMI_FULL".to_string(),
                permission_type: Some("RPC".to_string()),
            }]
        );
    }

    #[test]
    fn test_missing_parent_is_an_error() {
        let rows = AppRowSets {
            base: vec![base_row(1, "u1", 5)],
            display_names: vec![DisplayNameRow {
                id: 9,
                display_text: "Orphan".to_string(),
            }],
            ..Default::default()
        };

        assert_eq!(
            aggregate(rows).unwrap_err(),
            AggregateError::MissingParent {
                collection: "display_names",
                app_id: 9
            }
        );
    }

    #[test]
    fn test_service_for_missing_parent_is_an_error() {
        let rows = AppRowSets {
            base: vec![base_row(1, "u1", 5)],
            service_types: vec![service_type(3, "MEDIA")],
            ..Default::default()
        };

        assert!(matches!(
            aggregate(rows),
            Err(AggregateError::MissingParent {
                collection: "services",
                app_id: 3
            })
        ));
    }

    #[test]
    fn test_services_collect_names_and_permissions() {
        let rows = AppRowSets {
            base: vec![base_row(1, "u1", 5)],
            service_types: vec![service_type(1, "MEDIA"), service_type(1, "WEATHER")],
            service_type_names: vec![
                service_type_name(1, "WEATHER", "Forecast"),
                service_type_name(1, "MEDIA", "Player"),
            ],
            service_type_permissions: vec![ServiceTypePermissionRow {
                app_id: 1,
                service_type_name: "MEDIA".to_string(),
                function_id: Some(32784),
                display_name: Some("Button Press".to_string()),
                name: "ButtonPress".to_string(),
                is_selected: true,
            }],
            ..Default::default()
        };

        let apps = aggregate(rows).unwrap();
        let services = &apps[0].services;

        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "MEDIA");
        assert_eq!(services[0].display_name.as_deref(), Some("MEDIA service"));
        assert_eq!(services[0].service_names, vec!["Player".to_string()]);
        assert_eq!(
            services[0].permissions,
            vec![ServicePermission {
                app_id: Some(1),
                function_id: Some(32784),
                display_name: Some("Button Press".to_string()),
                name: "ButtonPress".to_string(),
                is_selected: true,
            }]
        );
        assert_eq!(services[1].name, "WEATHER");
        assert_eq!(services[1].service_names, vec!["Forecast".to_string()]);
        assert!(services[1].permissions.is_empty());
    }

    #[test]
    fn test_service_types_sharing_a_name_share_names() {
        let rows = AppRowSets {
            base: vec![base_row(1, "u1", 5)],
            service_types: vec![service_type(1, "MEDIA"), service_type(1, "MEDIA")],
            service_type_names: vec![
                service_type_name(1, "MEDIA", "Player"),
                service_type_name(1, "MEDIA", "Podcasts"),
            ],
            ..Default::default()
        };

        let apps = aggregate(rows).unwrap();
        let services = &apps[0].services;

        // matching is by name, so each shell picks up both name rows
        assert_eq!(services.len(), 2);
        for service in services {
            assert_eq!(
                service.service_names,
                vec!["Player".to_string(), "Podcasts".to_string()]
            );
        }
    }

    #[test]
    fn test_service_names_scoped_to_owning_app() {
        let rows = AppRowSets {
            base: vec![base_row(1, "u1", 5), base_row(2, "u2", 5)],
            service_types: vec![service_type(1, "MEDIA"), service_type(2, "MEDIA")],
            service_type_names: vec![
                service_type_name(1, "MEDIA", "Player"),
                service_type_name(2, "MEDIA", "Tuner"),
            ],
            ..Default::default()
        };

        let apps = aggregate(rows).unwrap();

        assert_eq!(apps[0].services[0].service_names, vec!["Player".to_string()]);
        assert_eq!(apps[1].services[0].service_names, vec!["Tuner".to_string()]);
    }

    #[test]
    fn test_duplicate_base_row_last_write_wins_first_position_kept() {
        let mut replacement = base_row(1, "u1-new", 5);
        replacement.name = "renamed".to_string();
        let rows = AppRowSets {
            base: vec![base_row(1, "u1", 5), base_row(2, "u2", 5), replacement],
            ..Default::default()
        };

        let apps = aggregate(rows).unwrap();

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].id, Some(1));
        assert_eq!(apps[0].name, "renamed");
        assert_eq!(apps[0].uuid, "u1-new");
        assert_eq!(apps[1].id, Some(2));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(AppRowSets::default()).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_one_app_per_distinct_id_in_first_seen_order(
            ids in prop::collection::vec(1i32..20, 0..40),
        ) {
            let base = ids.iter().map(|id| base_row(*id, &format!("u{}", id), 1)).collect();
            // child rows listed in reverse so their order cannot leak into emission
            let display_names = ids
                .iter()
                .rev()
                .map(|id| DisplayNameRow { id: *id, display_text: format!("name-{}", id) })
                .collect();

            let apps = aggregate(AppRowSets { base, display_names, ..Default::default() }).unwrap();

            let mut expected = Vec::new();
            for id in &ids {
                if !expected.contains(id) {
                    expected.push(*id);
                }
            }
            let emitted: Vec<i32> = apps.iter().filter_map(|app| app.id).collect();
            prop_assert_eq!(emitted, expected);

            for app in &apps {
                let id = app.id.unwrap_or_default();
                let occurrences = ids.iter().filter(|seen| **seen == id).count();
                prop_assert_eq!(app.display_names.len(), occurrences);
            }
        }
    }
}
