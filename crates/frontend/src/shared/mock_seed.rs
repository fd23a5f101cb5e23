//! Демо-данные mock-режима.
//!
//! Сроки нарядов и графиков считаются от момента заполнения, чтобы дашборды
//! показывали и просроченные, и ближайшие работы.

use chrono::{DateTime, Duration, Utc};
use contracts::domain::a001_equipment::{Equipment, EquipmentDto, EquipmentId, EquipmentStatus};
use contracts::domain::a002_equipment_category::{EquipmentCategory, EquipmentCategoryId};
use contracts::domain::a003_location::{Location, LocationDto, LocationId, LocationStatus, LocationType};
use contracts::domain::a004_part::{Part, PartDto, PartId};
use contracts::domain::a005_work_order::{
    Assignee, WorkOrder, WorkOrderComment, WorkOrderId, WorkOrderStatus, WorkOrderTask,
    WorkOrderType, SYSTEM_AUTHOR,
};
use contracts::domain::a006_maintenance_schedule::{
    FrequencyType, MaintenanceSchedule, MaintenanceScheduleId, ScheduleType,
};
use contracts::domain::a007_team::{Team, TeamDto, TeamId, TeamMemberRole};
use contracts::domain::a008_organization::{
    Organization, OrganizationDto, OrganizationId, SubscriptionTier,
};
use contracts::domain::common::Priority;
use contracts::system::audit::{AuditAction, AuditLog, AuditLogId};
use contracts::system::users::{User, UserId, UserRole};

use super::mock_store::{MockDb, MockTable};

/// Пароль всех демо-пользователей
pub const DEMO_PASSWORD: &str = "demo123";

fn ts(value: &str, fallback: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(fallback)
}

pub fn seed(now: DateTime<Utc>) -> MockDb {
    let users = users(now);
    let locations = locations(now);
    MockDb {
        equipment: MockTable::new(equipment(now)),
        categories: MockTable::new(categories()),
        parts: MockTable::new(parts(now)),
        work_orders: MockTable::new(work_orders(now)),
        schedules: MockTable::new(schedules(now)),
        teams: MockTable::new(teams(&users, &locations, now)),
        organizations: MockTable::new(organizations(now)),
        audit_logs: MockTable::new(audit_logs(&users, now)),
        locations: MockTable::new(locations),
        users: MockTable::new(users),
    }
}

fn categories() -> Vec<EquipmentCategory> {
    [
        ("HVAC", "Heating, Ventilation, and Air Conditioning"),
        ("Electrical", "Electrical systems and components"),
        ("Plumbing", "Water processing and distribution"),
        ("Production", "Manufacturing line equipment"),
        ("Fleet", "Company vehicles"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (name, description))| EquipmentCategory {
        id: EquipmentCategoryId::new((i + 1).to_string()),
        name: name.to_string(),
        description: Some(description.to_string()),
    })
    .collect()
}

fn equipment(now: DateTime<Utc>) -> Vec<Equipment> {
    let rows = [
        (
            "Industrial HVAC Unit", "1", "HVAC", "1", "Main Building - Roof", "HVAC-2023-001",
            EquipmentStatus::Operational, 92, "CoolMaster 3000", "ClimateCorp",
            "2023-01-01T00:00:00Z", "2024-03-15T10:00:00Z",
        ),
        (
            "Conveyor Belt Motor", "4", "Production", "2", "Warehouse A - Line 1", "MTR-500-X",
            EquipmentStatus::Maintenance, 65, "SpeedDrive 500", "MotoTech",
            "2023-02-15T00:00:00Z", "2024-04-01T08:30:00Z",
        ),
        (
            "Main Switchboard", "2", "Electrical", "1", "Main Building - Basement", "ELEC-MAIN-01",
            EquipmentStatus::Operational, 88, "PowerGrade 12kV", "ElectroSystems",
            "2022-11-10T00:00:00Z", "2024-01-20T14:45:00Z",
        ),
        (
            "Delivery Truck", "5", "Fleet", "4", "Parking Lot", "VIN-987654321",
            EquipmentStatus::Down, 32, "Hauler XL", "TruckCo",
            "2023-05-20T00:00:00Z", "2024-02-28T09:15:00Z",
        ),
    ];

    rows.iter()
        .enumerate()
        .map(
            |(i, (name, cat_id, cat, loc_id, loc, serial, status, health, model, maker, created, serviced))| {
                let dto = EquipmentDto {
                    name: name.to_string(),
                    category_id: cat_id.to_string(),
                    location_id: loc_id.to_string(),
                    serial_number: serial.to_string(),
                    status: *status,
                    health_score: *health,
                    model: model.to_string(),
                    manufacturer: maker.to_string(),
                    ..Default::default()
                };
                let mut item = Equipment::from_dto(
                    EquipmentId::new((i + 1).to_string()),
                    &dto,
                    cat.to_string(),
                    loc.to_string(),
                    ts(created, now),
                );
                item.last_maintenance_date = Some(ts(serviced, now));
                item
            },
        )
        .collect()
}

fn locations(now: DateTime<Utc>) -> Vec<Location> {
    let rows = [
        (
            "Main Warehouse", LocationType::Warehouse, LocationStatus::Active,
            "123 Market St", "San Francisco", "CA", "94105", 145, "John Doe",
        ),
        (
            "Downtown Office", LocationType::Office, LocationStatus::Active,
            "456 Broadway", "New York", "NY", "10012", 42, "Jane Smith",
        ),
        (
            "Site A - Construction", LocationType::JobSite, LocationStatus::Inactive,
            "789 Congress Ave", "Austin", "TX", "78701", 12, "",
        ),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (name, kind, status, address, city, state, zip, count, manager))| {
            let dto = LocationDto {
                name: name.to_string(),
                location_type: *kind,
                status: *status,
                address: address.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                zip_code: zip.to_string(),
                manager: manager.to_string(),
                ..Default::default()
            };
            let mut location = Location::from_dto(LocationId::new((i + 1).to_string()), &dto, now);
            location.equipment_count = *count;
            location
        })
        .collect()
}

fn parts(now: DateTime<Utc>) -> Vec<Part> {
    let rows = [
        (
            "Compressor Valve", "CV-2024-X", "High pressure relief valve for HVAC", "Valves",
            "Industrial Valves Co.", "IVC-500", "1", "Main Warehouse", 25, 10, 15, 45.99,
            "2023-01-01T00:00:00Z",
        ),
        (
            "Conveyor Belt Segment", "CBS-300", "Rubber belt connection segment", "Belts",
            "FlexBelt", "", "2", "Warehouse A", 5, 8, 10, 120.50,
            "2023-02-15T00:00:00Z",
        ),
        (
            "Hydraulic Filter", "HF-101", "Standard hydraulic oil filter", "Filters",
            "FiltrationSys", "", "1", "Main Warehouse", 50, 20, 30, 12.00,
            "2023-03-10T00:00:00Z",
        ),
    ];

    rows.iter()
        .enumerate()
        .map(
            |(i, (name, number, description, category, maker, model, loc_id, loc, qty, min, reorder, cost, created))| {
                let dto = PartDto {
                    name: name.to_string(),
                    part_number: number.to_string(),
                    description: description.to_string(),
                    category: category.to_string(),
                    manufacturer: maker.to_string(),
                    model_number: model.to_string(),
                    location_id: loc_id.to_string(),
                    quantity_on_hand: *qty,
                    minimum_stock_level: *min,
                    reorder_point: *reorder,
                    unit_cost: *cost,
                    ..Default::default()
                };
                Part::from_dto(
                    PartId::new((i + 1).to_string()),
                    &dto,
                    Some(loc.to_string()),
                    ts(created, now),
                )
            },
        )
        .collect()
}

fn work_orders(now: DateTime<Utc>) -> Vec<WorkOrder> {
    let days = Duration::days;
    let rows = [
        (
            "WO-1001", "HVAC System Maintenance",
            "Quarterly maintenance check for the main building HVAC system.",
            WorkOrderStatus::Pending, Priority::High, WorkOrderType::Maintenance,
            Some("Alex Johnson"), Some("1"), days(3), days(-14),
        ),
        (
            "WO-1002", "Replace Printer Cartridges",
            "Replace toner in the 2nd floor marketing office printer.",
            WorkOrderStatus::Pending, Priority::Low, WorkOrderType::Maintenance,
            None, None, days(8), days(-13),
        ),
        (
            "WO-1003", "Server Room Overheating",
            "Investigate temperature alerts in Server Room B.",
            WorkOrderStatus::InProgress, Priority::Critical, WorkOrderType::Repair,
            Some("Sarah Connor"), None, days(-1), days(-12),
        ),
        (
            "WO-1004", "Install New Security Cameras",
            "Mount and configure 3 new cameras in the loading dock area.",
            WorkOrderStatus::Pending, Priority::Medium, WorkOrderType::Installation,
            Some("Mike Smith"), None, days(12), days(-11),
        ),
        (
            "WO-1005", "Safety Inspection",
            "Annual fire safety equipment inspection.",
            WorkOrderStatus::Completed, Priority::High, WorkOrderType::Inspection,
            Some("Jane Doe"), None, days(-10), days(-25),
        ),
        (
            "WO-1006", "Leaking Faucet in Kitchen",
            "Repair the dripping faucet in the break room kitchenette.",
            WorkOrderStatus::InReview, Priority::Low, WorkOrderType::Repair,
            Some("Tom Wilson"), None, days(1), days(-10),
        ),
    ];

    rows.iter()
        .map(
            |(id, title, description, status, priority, kind, assignee, equipment, due, age)| WorkOrder {
                id: WorkOrderId::new(*id),
                title: title.to_string(),
                description: description.to_string(),
                status: *status,
                priority: *priority,
                work_order_type: *kind,
                assignee: assignee.map(Assignee::named),
                equipment_id: equipment.map(EquipmentId::new),
                due_date: now + *due,
                created_at: now + *age,
                tasks: Vec::new(),
                comments: Vec::new(),
            },
        )
        .map(|mut order| {
            if order.id.as_str() == "WO-1001" {
                order.tasks = [
                    ("t1", "Inspect filters", true),
                    ("t2", "Clean coils", false),
                    ("t3", "Check refrigerant levels", false),
                ]
                .iter()
                .map(|(id, text, completed)| WorkOrderTask {
                    id: id.to_string(),
                    text: text.to_string(),
                    completed: *completed,
                })
                .collect();
                order.comments = vec![
                    WorkOrderComment {
                        id: "c1".into(),
                        author: SYSTEM_AUTHOR.into(),
                        message: "Work order created".into(),
                        created_at: order.created_at,
                    },
                    WorkOrderComment {
                        id: "c2".into(),
                        author: "Alex Johnson".into(),
                        message: "Will start this tomorrow morning.".into(),
                        created_at: order.created_at + Duration::hours(4),
                    },
                ];
            }
            order
        })
        .collect()
}

fn schedules(now: DateTime<Utc>) -> Vec<MaintenanceSchedule> {
    let rows = [
        ("1", "Industrial HVAC Unit", ScheduleType::Preventive, FrequencyType::Monthly, 3, 5, Priority::High, true),
        ("2", "Conveyor Belt Motor", ScheduleType::Predictive, FrequencyType::Weekly, 2, -2, Priority::Medium, true),
        ("3", "Main Switchboard", ScheduleType::ConditionBased, FrequencyType::Yearly, 1, 60, Priority::Critical, true),
        ("1", "Industrial HVAC Unit", ScheduleType::Preventive, FrequencyType::Monthly, 1, -20, Priority::Low, false),
    ];

    rows.iter()
        .enumerate()
        .map(
            |(i, (equipment_id, name, kind, frequency, every, due_in, priority, active))| {
                let next_due = now + Duration::days(*due_in);
                MaintenanceSchedule {
                    id: MaintenanceScheduleId::new((i + 1).to_string()),
                    equipment_id: EquipmentId::new(*equipment_id),
                    equipment_name: name.to_string(),
                    schedule_type: *kind,
                    frequency_type: *frequency,
                    frequency_value: *every,
                    last_performed: Some(next_due - Duration::days(30)),
                    next_due,
                    priority: *priority,
                    is_active: *active,
                }
            },
        )
        .collect()
}

fn users(now: DateTime<Utc>) -> Vec<User> {
    let rows = [
        ("superadmin@cmms.local", "Sam", "Carter", UserRole::SuperAdmin, true),
        ("admin@cmms.local", "Priya", "Patel", UserRole::Admin, true),
        ("manager@cmms.local", "Maria", "Garcia", UserRole::Manager, true),
        ("technician@cmms.local", "Alex", "Johnson", UserRole::Technician, true),
        ("operator@cmms.local", "Omar", "Haddad", UserRole::Operator, true),
        ("viewer@cmms.local", "Victor", "Lee", UserRole::Viewer, true),
        ("tom.wilson@cmms.local", "Tom", "Wilson", UserRole::Technician, false),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (email, first, last, role, active))| User {
            id: UserId::new((i + 1).to_string()),
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: None,
            role: *role,
            is_active: *active,
            created_at: now - Duration::days(90),
            last_login: None,
        })
        .collect()
}

fn teams(users: &[User], locations: &[Location], now: DateTime<Utc>) -> Vec<Team> {
    let rows = [
        ("HVAC Crew", "Rooftop units and climate control", Some("4"), "1", &["5"][..], true),
        ("Facilities Team", "Office upkeep and safety inspections", Some("3"), "2", &["6"][..], true),
        ("Fleet Crew", "Company vehicles and loading equipment", None, "", &[][..], false),
    ];
    let user = |id: &str| users.iter().find(|u| u.id.as_str() == id);
    let since = now - Duration::days(60);

    rows.iter()
        .enumerate()
        .map(|(i, (name, description, leader, location_id, members, active))| {
            let dto = TeamDto {
                name: name.to_string(),
                description: description.to_string(),
                leader_id: leader.unwrap_or_default().to_string(),
                location_id: location_id.to_string(),
                is_active: *active,
                ..Default::default()
            };
            let location_name = locations
                .iter()
                .find(|l| l.id.as_str() == *location_id)
                .map(|l| l.name.clone());
            let mut team = Team::from_dto(
                TeamId::new((i + 1).to_string()),
                &dto,
                leader.and_then(user),
                location_name,
                since,
            );
            for member in members.iter().filter_map(|id| user(id)) {
                // Сид заведомо без дублей и неактивных
                let _ = team.add_member(member, TeamMemberRole::Member, since);
            }
            team.is_active = *active;
            team
        })
        .collect()
}

fn organizations(now: DateTime<Utc>) -> Vec<Organization> {
    let rows = [
        (
            "Acme Manufacturing", "Manufacturing", "ops@acme.example", "New York", "NY",
            SubscriptionTier::Enterprise, true, 400,
        ),
        (
            "Global Logistics Inc", "Transportation", "fleet@globallogistics.example", "Chicago", "IL",
            SubscriptionTier::Pro, true, 250,
        ),
        (
            "TechStart Solutions", "Technology", "hello@techstart.example", "San Francisco", "CA",
            SubscriptionTier::Basic, false, 20,
        ),
        (
            "Bright Health Systems", "Healthcare", "facilities@brighthealth.example", "Boston", "MA",
            SubscriptionTier::Pro, true, 180,
        ),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (name, industry, email, city, state, tier, active, age_days))| {
            let dto = OrganizationDto {
                name: name.to_string(),
                industry: industry.to_string(),
                email: email.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                country: "USA".to_string(),
                subscription_tier: *tier,
                ..Default::default()
            };
            let mut org = Organization::from_dto(
                OrganizationId::new((i + 1).to_string()),
                &dto,
                now - Duration::days(*age_days),
            );
            org.is_active = *active;
            org.subscription_expires_at = Some(now + Duration::days(365 - age_days % 365));
            org
        })
        .collect()
}

fn audit_logs(users: &[User], now: DateTime<Utc>) -> Vec<AuditLog> {
    let rows = [
        (Some("2"), AuditAction::Login, "auth", None, "Signed in", true, -30),
        (Some("3"), AuditAction::Create, "team", Some("2"), "Created team Facilities Team", true, -25),
        (Some("4"), AuditAction::StatusChange, "workorder", Some("WO-1003"), "Pending -> In Progress", true, -20),
        (None, AuditAction::Login, "auth", None, "Failed sign-in for unknown@cmms.local", false, -15),
        (Some("2"), AuditAction::Update, "organization", Some("1"), "Updated organization Acme Manufacturing", true, -10),
        (Some("3"), AuditAction::Assignment, "team", Some("1"), "Added Omar Haddad to HVAC Crew", true, -5),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (actor, action, resource, resource_id, details, success, hours))| {
            let actor = actor.and_then(|id| users.iter().find(|u| u.id.as_str() == id));
            let mut log = AuditLog::new(
                AuditLogId::new((i + 1).to_string()),
                actor,
                *action,
                resource,
                *resource_id,
                *details,
                now + Duration::hours(*hours),
            );
            log.ip_address = Some(format!("10.0.0.{}", 10 + i));
            log.success = *success;
            log
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sizes() {
        let db = seed(Utc::now());
        assert_eq!(db.equipment.len(), 4);
        assert_eq!(db.categories.len(), 5);
        assert_eq!(db.locations.len(), 3);
        assert_eq!(db.parts.len(), 3);
        assert_eq!(db.work_orders.len(), 6);
        assert_eq!(db.schedules.len(), 4);
        assert_eq!(db.users.len(), 7);
        assert_eq!(db.teams.len(), 3);
        assert_eq!(db.organizations.len(), 4);
        assert_eq!(db.audit_logs.len(), 6);
    }

    #[test]
    fn test_seed_teams_and_organizations() {
        let db = seed(Utc::now());
        let hvac = db.teams.get("1").unwrap();
        assert_eq!(hvac.leader_name.as_deref(), Some("Alex Johnson"));
        assert_eq!(hvac.location_name.as_deref(), Some("Main Warehouse"));
        assert_eq!(hvac.members_count(), 2);
        let fleet = db.teams.get("3").unwrap();
        assert!(!fleet.is_active);
        assert_eq!(fleet.leader_id, None);

        let acme = db.organizations.get("1").unwrap();
        assert_eq!(acme.slug, "acme-manufacturing");
        assert_eq!(acme.location_label(), "New York, NY, USA");
        assert!(!db.organizations.get("3").unwrap().is_active);

        let failed = db.audit_logs.get("4").unwrap();
        assert!(!failed.success);
        assert_eq!(failed.user_name, "System");
    }

    #[test]
    fn test_seed_values() {
        let db = seed(Utc::now());
        let valve = db.parts.get("1").unwrap();
        assert_eq!(valve.total_value, 1149.75);
        let truck = db.equipment.get("4").unwrap();
        assert_eq!(truck.status, EquipmentStatus::Down);
        assert_eq!(truck.category_name, "Fleet");
        let first = db.work_orders.get("WO-1001").unwrap();
        assert_eq!(first.task_progress(), (1, 3));
        assert_eq!(first.comments.len(), 2);
    }
}
