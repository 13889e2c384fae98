//! Demo data for both desks.
//!
//! Seeding goes through the repositories, so the links must be connected
//! while it runs.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, Utc, Weekday};

use crate::domain::value_objects::image;
use crate::domain::*;
use crate::infrastructure::repositories::Repositories;
use crate::shared::error::RepositoryError;
use crate::shared::password::hash_password;

/// Password of every seeded operator account.
pub const DEMO_PASSWORD: &str = "password123";

/// Password of every seeded tourist.
pub const DEMO_TOURIST_PASSWORD: &str = "Tourist#2024";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn hashed(password: &str) -> Result<String, SeedError> {
    hash_password(password).map_err(|e| SeedError::Hashing(e.to_string()))
}

/// Load the demo data set into `repos`.
pub async fn seed(repos: &Repositories) -> Result<(), SeedError> {
    seed_etour(repos).await?;
    seed_smos(repos).await?;
    tracing::info!("Demo data seeded");
    Ok(())
}

async fn seed_etour(repos: &Repositories) -> Result<(), SeedError> {
    let news = [
        News {
            id: 1,
            title: "Tourism Booms".into(),
            content: "Arrivals on the Amalfi Coast are up 12% on last season.".into(),
            author: "Agency Desk".into(),
            publication_date: date(2024, 5, 1),
            status: NewsStatus::Published,
        },
        News {
            id: 2,
            title: "New Ferry Line to Capri".into(),
            content: "Daily departures from Salerno harbour start in June.".into(),
            author: "Agency Desk".into(),
            publication_date: date(2024, 5, 20),
            status: NewsStatus::Draft,
        },
    ];
    for item in &news {
        repos.news.save(item).await?;
    }

    let points = [
        RefreshmentPoint {
            address: "Via dei Mercanti 14".into(),
            capacity: Some(60),
            opening_hours: Some("12:00-15:00, 19:00-23:00".into()),
            ..RefreshmentPoint::new(1, "Trattoria da Gino", "Salerno", 3)
        },
        RefreshmentPoint {
            address: "Piazza dei Mulini 2".into(),
            capacity: Some(25),
            opening_hours: Some("07:00-01:00".into()),
            ..RefreshmentPoint::new(2, "Bar Centrale", "Positano", 1)
        },
        RefreshmentPoint {
            address: "Lungomare Trieste 40".into(),
            status: PointStatus::UnderMaintenance,
            ..RefreshmentPoint::new(3, "Chiosco del Porto", "Salerno", 2)
        },
    ];
    for point in &points {
        repos.points.save(point).await?;
    }

    // Bar Centrale starts with its only banner slot taken
    let promo = b"bar-centrale-spritz-promo";
    repos
        .banners
        .save(&Banner {
            id: 1,
            point_id: 2,
            image_name: "spritz.png".into(),
            digest: image::digest(promo),
            size_bytes: promo.len(),
            width: 800,
            height: 200,
            created_at: Utc::now(),
        })
        .await?;

    let sites = [
        ("Duomo di Salerno", "Salerno", "Cathedral", "Romanesque cathedral with bronze doors from Constantinople.", Some("08:30-20:00")),
        ("Villa Rufolo", "Ravello", "Villa", "Medieval villa with terraced gardens over the sea.", Some("09:00-19:00")),
        ("Parco Archeologico", "Paestum", "Archaeological site", "Three Doric temples of Magna Graecia.", None),
    ];
    for (i, (name, city, kind, description, hours)) in sites.into_iter().enumerate() {
        repos
            .sites
            .save(&CulturalHeritage {
                id: i as i64 + 1,
                name: name.into(),
                city: city.into(),
                kind: kind.into(),
                description: description.into(),
                opening_hours: hours.map(String::from),
            })
            .await?;
    }

    let tourist_hash = hashed(DEMO_TOURIST_PASSWORD)?;
    let tourists = [
        ("mario_rossi", "mario.rossi@example.com", "Mario", "Rossi", Some("+39 333 1234567")),
        ("anna_bianchi", "anna.bianchi@example.com", "Anna", "Bianchi", None),
    ];
    for (i, (username, email, first, last, phone)) in tourists.into_iter().enumerate() {
        repos
            .tourists
            .save(&Tourist {
                id: i as i64 + 1,
                username: username.into(),
                email: email.into(),
                first_name: first.into(),
                last_name: last.into(),
                phone: phone.map(String::from),
                password_hash: tourist_hash.clone(),
                active: true,
                registered_at: Utc::now(),
            })
            .await?;
    }

    for (day, dishes) in [
        (Weekday::Mon, vec!["Scialatielli ai frutti di mare", "Insalata caprese"]),
        (Weekday::Fri, vec!["Frittura di paranza", "Delizia al limone"]),
    ] {
        repos
            .menus
            .save(&DailyMenu {
                point_id: 1,
                day,
                dishes: dishes.into_iter().map(String::from).collect(),
                special_notes: String::new(),
            })
            .await?;
    }

    for (id, name, description) in [
        (1, "seafood", "Fish and shellfish from the gulf"),
        (2, "museums", "Art, archaeology and history collections"),
        (3, "sea-view", "Terraces and tables facing the sea"),
    ] {
        repos
            .tags
            .save(&Tag {
                id,
                name: name.into(),
                description: description.into(),
                created_at: Utc::now(),
            })
            .await?;
    }

    let now = Utc::now();
    repos
        .feedback
        .save(&Feedback {
            id: 1,
            site_id: 2,
            tourist_id: 1,
            rating: 5,
            comment: "Unforgettable view".into(),
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(())
}

async fn seed_smos(repos: &Repositories) -> Result<(), SeedError> {
    let addresses = [
        ("Main Campus", "Via Giovanni Paolo II 132", "Fisciano", "84084", vec!["1A", "2B"]),
        ("Science Annex", "Via Ponte don Melillo 1", "Fisciano", "84084", vec!["3C"]),
        ("Old Library", "Corso Vittorio Emanuele 22", "Salerno", "84122", vec![]),
        ("Gym Building", "Via Roma 5", "Salerno", "84121", vec![]),
    ];
    for (i, (name, street, city, zip, classes)) in addresses.into_iter().enumerate() {
        repos
            .addresses
            .save(&Address {
                id: i as i64 + 1,
                name: name.into(),
                street: street.into(),
                city: city.into(),
                zip_code: zip.into(),
                country: "Italy".into(),
                associated_classes: classes.into_iter().map(String::from).collect(),
            })
            .await?;
    }

    // Class names match the ones listed on the addresses above
    for (id, name, address_id) in [(1, "1A", 1), (2, "2B", 1), (3, "3C", 2)] {
        repos
            .classes
            .save(&SchoolClass {
                id,
                name: name.into(),
                address_id,
                academic_year: "2024-2025".into(),
            })
            .await?;
    }

    let teachings = [
        ("MAT1", "Mathematics", "Prof. Bruno Ferri", "Mon/Wed 08:30-10:30", vec![1]),
        ("ITA1", "Italian Literature", "Prof. Elena Costa", "Tue/Thu 10:30-12:30", vec![1, 2]),
        ("SCI2", "Natural Sciences", "Prof. Davide Greco", "Fri 08:30-11:30", vec![]),
    ];
    for (i, (code, name, instructor, schedule, address_ids)) in teachings.into_iter().enumerate() {
        repos
            .teachings
            .save(&Teaching {
                id: i as i64 + 1,
                code: code.into(),
                name: name.into(),
                instructor: instructor.into(),
                schedule: schedule.into(),
                description: format!("{name} for first and second year classes."),
                address_ids: address_ids.into_iter().collect(),
            })
            .await?;
    }

    let requests = [
        ("Giulia Verdi", "giulia.verdi@school.example", RequestStatus::Pending),
        ("Marco Neri", "marco.neri@school.example", RequestStatus::Pending),
        ("Sara Gialli", "sara.gialli@school.example", RequestStatus::Accepted),
    ];
    for (i, (name, email, status)) in requests.into_iter().enumerate() {
        repos
            .requests
            .save(&RegistrationRequest {
                id: i as i64 + 1,
                student_name: name.into(),
                email: email.into(),
                requested_at: Utc::now(),
                status,
            })
            .await?;
    }

    for (id, name, email) in [
        (1, "Luca Esposito", "luca.esposito@school.example"),
        (2, "Chiara Russo", "chiara.russo@school.example"),
    ] {
        repos
            .students
            .save(&Student {
                id,
                name: name.into(),
                email: email.into(),
                active: true,
                enrolled_at: Utc::now(),
            })
            .await?;
    }

    repos
        .late_entries
        .save(&LateEntry {
            id: 1,
            student_id: 1,
            date: date(2024, 3, 11),
            entry_time: NaiveTime::from_hms_opt(8, 20, 0).unwrap_or_default(),
            note: Some("Train delayed".into()),
        })
        .await?;

    for (id, student_id, day, justified) in [(1, 1, 4, false), (2, 1, 5, true), (3, 2, 6, false)] {
        repos
            .absences
            .save(&Absence {
                id,
                student_id,
                date: date(2024, 3, day),
                justified,
            })
            .await?;
    }
    repos
        .justifications
        .save(&Justification {
            id: 1,
            absence_id: 2,
            reason: "Medical visit".into(),
            submitted_at: Utc::now(),
        })
        .await?;

    let password_hash = hashed(DEMO_PASSWORD)?;
    let accounts = [
        ("admin", "Administrator", vec![Role::Administrator], true),
        ("teacher", "Prof. Bruno Ferri", vec![Role::Teacher], true),
        ("operator", "Agency Operator", vec![Role::AgencyOperator, Role::PointOperator], true),
        ("former", "Former Teacher", vec![Role::Teacher], false),
    ];
    for (username, display_name, roles, enabled) in accounts {
        repos
            .accounts
            .save(&Account {
                username: username.into(),
                display_name: display_name.into(),
                password_hash: password_hash.clone(),
                roles: roles.into_iter().collect::<BTreeSet<_>>(),
                enabled,
                failed_attempts: 0,
            })
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simulation::ServerLinks;

    #[tokio::test]
    async fn test_seed_loads_both_desks() {
        let links = ServerLinks::connected();
        let repos = Repositories::new(&links);
        seed(&repos).await.unwrap();

        let news = repos.news.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(news.title, "Tourism Booms");

        let addresses = repos.addresses.find_all().await.unwrap();
        assert_eq!(addresses.len(), 4);
        assert!(addresses[0].has_classes());
        assert!(!addresses[2].has_classes());

        let classes = repos.classes.find_by_address(1).await.unwrap();
        let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, addresses[0].associated_classes);

        let admin = repos.accounts.find_by_username("admin").await.unwrap().unwrap();
        assert!(admin.has_role(Role::Administrator));
    }

    #[tokio::test]
    async fn test_seed_fails_while_disconnected() {
        let links = ServerLinks::connected();
        links.smos.disconnect();
        let repos = Repositories::new(&links);
        assert!(matches!(seed(&repos).await, Err(SeedError::Repository(_))));
    }
}
