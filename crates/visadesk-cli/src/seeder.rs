//! Fake applicants and applications for development databases.

use std::time::Instant;

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::address::en::{CityName, CountryName, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use visadesk_core::hash_password;
use visadesk_db::{ApplicationRepository, UserRepository};
use visadesk_models::applications::{NewApplication, PersonalInfo, TravelInfo};
use visadesk_models::users::{NewUser, UserRole};
use visadesk_models::{Email, UserId};

/// Password given to every seeded applicant.
pub const SEED_PASSWORD: &str = "password123";

const PURPOSES: &[&str] = &["tourism", "business", "study", "family visit", "conference"];
const GENDERS: &[&str] = &["female", "male", "other"];

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub users: usize,
    pub applications_per_user: usize,
}

impl SeedConfig {
    pub fn new(users: usize, applications_per_user: usize) -> Self {
        Self {
            users,
            applications_per_user,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSummary {
    pub users: usize,
    pub applications: usize,
}

/// Build a seeded applicant. The index keeps generated emails unique.
pub fn generate_applicant(index: usize, password_hash: &str) -> anyhow::Result<NewUser> {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email = Email::new(format!(
        "{}.{}+applicant{}@example.com",
        email_part(&first_name),
        email_part(&last_name),
        index
    ))?;

    Ok(NewUser {
        email,
        password_hash: password_hash.to_string(),
        role: UserRole::User,
    })
}

pub fn generate_application(owner: UserId, owner_email: &Email) -> NewApplication {
    let now = Utc::now();
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let age_days: i64 = (18 * 365..70 * 365).fake();
    let lead_days: i64 = (14..180).fake();
    let stay_days: i64 = (3..60).fake();
    let arrival = now + Duration::days(lead_days);
    let departure = arrival + Duration::days(stay_days);

    let personal_info = PersonalInfo {
        name: format!("{} {}", first_name, last_name),
        email: owner_email.to_string(),
        passport_number: format!("P{:08}", (0..100_000_000u32).fake::<u32>()),
        passport_expiration_date: now + Duration::days((365..3650).fake::<i64>()),
        date_of_birth: now - Duration::days(age_days),
        nationality: CountryName().fake(),
        gender: pick(GENDERS).to_string(),
        phone_number: PhoneNumber().fake(),
        address: format!(
            "{} {}, {}",
            (1..999u32).fake::<u32>(),
            StreetName().fake::<String>(),
            CityName().fake::<String>()
        ),
    };

    let travel_info = TravelInfo {
        destination: CountryName().fake(),
        date: arrival,
        purpose: pick(PURPOSES).to_string(),
        travel_companions: Vec::new(),
        travel_dates: vec![
            arrival.format("%Y-%m-%d").to_string(),
            departure.format("%Y-%m-%d").to_string(),
        ],
        travel_documents: vec!["passport".to_string()],
        travel_budget: format!("{} USD", (500..20_000u32).fake::<u32>()),
        travel_insurance: "standard".to_string(),
        intended_arrival_date: arrival,
        intended_departure_date: departure,
    };

    NewApplication {
        user_id: owner,
        personal_info,
        travel_info,
    }
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

fn pick(options: &[&'static str]) -> &'static str {
    options[(0..options.len()).fake::<usize>()]
}

/// Insert `config.users` applicants, each with
/// `config.applications_per_user` pending applications.
pub async fn seed(
    users: &dyn UserRepository,
    applications: &dyn ApplicationRepository,
    config: SeedConfig,
) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    println!(
        "👥 Seeding {} applicants ({} applications each)...",
        config.users, config.applications_per_user
    );

    // One hash shared by every seeded applicant.
    let password_hash = hash_password(SEED_PASSWORD).map_err(|e| e.error)?;
    let mut summary = SeedSummary::default();

    for index in 0..config.users {
        let applicant = generate_applicant(index, &password_hash)?;
        let user = match users.insert(applicant).await {
            Ok(user) => user,
            Err(e) => {
                eprintln!("   ! Skipping applicant {}: {}", index, e);
                continue;
            }
        };
        summary.users += 1;

        for _ in 0..config.applications_per_user {
            applications
                .insert(generate_application(user.id, &user.email))
                .await
                .map_err(|e| e.error)?;
            summary.applications += 1;
        }
    }

    println!(
        "   ✓ Inserted {} applicants and {} applications in {:?}",
        summary.users,
        summary.applications,
        start_time.elapsed()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_applicants_have_distinct_emails() {
        let first = generate_applicant(1, "hash").unwrap();
        let second = generate_applicant(2, "hash").unwrap();
        assert_ne!(first.email, second.email);
        assert_eq!(first.role, UserRole::User);
    }

    #[test]
    fn test_generated_application_dates_are_ordered() {
        let owner = UserId::new();
        let email = Email::new("owner@example.com").unwrap();
        let application = generate_application(owner, &email);
        assert_eq!(application.user_id, owner);
        assert_eq!(application.personal_info.email, "owner@example.com");
        assert!(application.personal_info.date_of_birth < Utc::now());
        assert!(
            application.travel_info.intended_arrival_date
                < application.travel_info.intended_departure_date
        );
    }

    #[test]
    fn test_generated_application_has_required_fields() {
        let email = Email::new("owner@example.com").unwrap();
        let application = generate_application(UserId::new(), &email);
        assert!(!application.personal_info.name.is_empty());
        assert!(application.personal_info.passport_number.starts_with('P'));
        assert!(!application.travel_info.destination.is_empty());
        assert!(PURPOSES.contains(&application.travel_info.purpose.as_str()));
        assert_eq!(application.travel_info.travel_dates.len(), 2);
    }
}
