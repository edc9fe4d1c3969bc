//! Demo records
//!
//! Fills empty collections with a small demo school: four teachers, five
//! students in grades 5, 5, 7, 9 and 11, and four lessons. Collections that
//! already hold data are left alone, so seeding twice is harmless.
//!
//! Demo login accounts are created by `AuthService::seed_demo_accounts`
//! because they need password hashing.

use anyhow::{Context, Result};

use super::Database;
use crate::models::{ScheduleInput, StudentInput, TeacherInput};

pub async fn seed_records(db: &Database) -> Result<()> {
    if db.teachers.count().await? == 0 {
        for input in demo_teachers() {
            db.teachers.create(input).await.context("Failed to seed teacher")?;
        }
        tracing::info!("Seeded demo teachers");
    }

    if db.students.count().await? == 0 {
        for input in demo_students() {
            db.students.create(input).await.context("Failed to seed student")?;
        }
        tracing::info!("Seeded demo students");
    }

    if db.schedule.count().await? == 0 {
        for input in demo_schedule() {
            db.schedule.create(input).await.context("Failed to seed lesson")?;
        }
        tracing::info!("Seeded demo schedule");
    }

    Ok(())
}

fn demo_teachers() -> Vec<TeacherInput> {
    [
        ("Aziza", "Karimova", "Matematika", "+998901234567", "aziza@maktab.uz"),
        ("Jasur", "Toshmatov", "Fizika", "+998901234568", "jasur@maktab.uz"),
        ("Nodira", "Ahmadova", "Ona tili", "+998901234569", "nodira@maktab.uz"),
        ("Sardor", "Rahimov", "Ingliz tili", "+998901234570", "sardor@maktab.uz"),
    ]
    .into_iter()
    .map(|(ism, familiya, fan, telefon, email)| TeacherInput {
        ism: ism.to_string(),
        familiya: familiya.to_string(),
        fan: fan.to_string(),
        telefon: telefon.to_string(),
        email: Some(email.to_string()),
    })
    .collect()
}

fn demo_students() -> Vec<StudentInput> {
    [
        ("Akmal", "Usmonov", 5, 11, "Usmanov Abbos", "+998901111111"),
        ("Malika", "Yusupova", 5, 11, "Yusupov Mansur", "+998901111112"),
        ("Dilshod", "Karimov", 7, 13, "Karimov Davron", "+998901111113"),
        ("Nilufar", "Aliyeva", 9, 15, "Aliyev Olim", "+998901111114"),
        ("Javohir", "Ergashev", 11, 17, "Ergashev Shavkat", "+998901111115"),
    ]
    .into_iter()
    .map(|(ism, familiya, sinf, yosh, ota_onasi, telefon)| StudentInput {
        ism: ism.to_string(),
        familiya: familiya.to_string(),
        sinf,
        yosh,
        ota_onasi: ota_onasi.to_string(),
        telefon: telefon.to_string(),
    })
    .collect()
}

fn demo_schedule() -> Vec<ScheduleInput> {
    [
        (5, "Dushanba", "08:00-08:45", "Matematika", 1, "201"),
        (5, "Dushanba", "09:00-09:45", "Ona tili", 3, "105"),
        (7, "Dushanba", "08:00-08:45", "Fizika", 2, "302"),
        (9, "Seshanba", "10:00-10:45", "Ingliz tili", 4, "108"),
    ]
    .into_iter()
    .map(|(sinf, kun, vaqt, fan, teacher_id, xona)| ScheduleInput {
        sinf,
        kun: kun.to_string(),
        vaqt: vaqt.to_string(),
        fan: fan.to_string(),
        teacher_id,
        xona: xona.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_fills_empty_collections() {
        let db = Database::in_memory();
        seed_records(&db).await.unwrap();

        assert_eq!(db.teachers.count().await.unwrap(), 4);
        assert_eq!(db.students.count().await.unwrap(), 5);
        assert_eq!(db.schedule.count().await.unwrap(), 4);

        let aziza = db.teachers.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(aziza.ism, "Aziza");
        assert_eq!(aziza.email.as_deref(), Some("aziza@maktab.uz"));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::in_memory();
        seed_records(&db).await.unwrap();
        seed_records(&db).await.unwrap();

        assert_eq!(db.teachers.count().await.unwrap(), 4);
        assert_eq!(db.students.count().await.unwrap(), 5);
    }
}
