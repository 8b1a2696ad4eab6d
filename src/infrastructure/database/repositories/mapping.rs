//! Entity <-> domain conversions shared by the repositories and the
//! booking transaction.

use sea_orm::{DbErr, SqlErr};

use crate::domain::account::{Account, Role};
use crate::domain::fleet::{Car, TouristPoint};
use crate::domain::ledger::{EntryType, LedgerEntry};
use crate::domain::reservation::Reservation;
use crate::domain::tour_package::{TourPackage, TourType};
use crate::domain::DomainError;
use crate::infrastructure::database::entities::account::AccountRole;
use crate::infrastructure::database::entities::ledger_entry::EntryKind;
use crate::infrastructure::database::entities::tour_package::TourKind;
use crate::infrastructure::database::entities::{
    account, car, ledger_entry, reservation, tour_package, tourist_point,
};

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Map unique-constraint violations to `Conflict`, everything else to `Storage`.
pub(crate) fn insert_err(what: &str) -> impl FnOnce(DbErr) -> DomainError + '_ {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict(format!("{} already exists", what))
        }
        _ => db_err(e),
    }
}

// ── Enums ───────────────────────────────────────────────────────

pub(crate) fn role_to_db(role: Role) -> AccountRole {
    match role {
        Role::User => AccountRole::User,
        Role::Driver => AccountRole::Driver,
    }
}

pub(crate) fn role_from_db(role: AccountRole) -> Role {
    match role {
        AccountRole::User => Role::User,
        AccountRole::Driver => Role::Driver,
    }
}

pub(crate) fn tour_type_to_db(t: TourType) -> TourKind {
    match t {
        TourType::Buggy => TourKind::Buggy,
        TourType::Lancha => TourKind::Lancha,
        TourType::FourByFour => TourKind::FourByFour,
    }
}

fn tour_type_from_db(t: TourKind) -> TourType {
    match t {
        TourKind::Buggy => TourType::Buggy,
        TourKind::Lancha => TourType::Lancha,
        TourKind::FourByFour => TourType::FourByFour,
    }
}

pub(crate) fn entry_type_to_db(t: EntryType) -> EntryKind {
    match t {
        EntryType::Credit => EntryKind::Credit,
        EntryType::Debit => EntryKind::Debit,
        EntryType::Pendant => EntryKind::Pendant,
        EntryType::Reversal => EntryKind::Reversal,
    }
}

fn entry_type_from_db(t: EntryKind) -> EntryType {
    match t {
        EntryKind::Credit => EntryType::Credit,
        EntryKind::Debit => EntryType::Debit,
        EntryKind::Pendant => EntryType::Pendant,
        EntryKind::Reversal => EntryType::Reversal,
    }
}

// ── Models ──────────────────────────────────────────────────────

pub(crate) fn account_from_model(m: account::Model) -> Account {
    Account {
        id: m.id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        password_hash: m.password_hash,
        role: role_from_db(m.role),
        created_at: m.created_at,
        updated_at: m.updated_at,
        last_login_at: m.last_login_at,
    }
}

pub(crate) fn car_from_model(m: car::Model) -> Car {
    Car {
        id: m.id,
        driver_id: m.driver_id,
        model: m.model,
        plate: m.plate,
        capacity: m.capacity,
        created_at: m.created_at,
    }
}

pub(crate) fn tourist_point_from_model(m: tourist_point::Model) -> TouristPoint {
    TouristPoint {
        id: m.id,
        driver_id: m.driver_id,
        name: m.name,
        city: m.city,
        description: m.description,
        created_at: m.created_at,
    }
}

pub(crate) fn package_from_model(m: tour_package::Model) -> TourPackage {
    TourPackage {
        id: m.id,
        driver_id: m.driver_id,
        car_id: m.car_id,
        tourist_point_id: m.tourist_point_id,
        title: m.title,
        origin_local: m.origin_local,
        destiny_local: m.destiny_local,
        date_tour: m.date_tour,
        price: m.price,
        seats_available: m.seats_available,
        vacancies: m.vacancies,
        tour_type: tour_type_from_db(m.tour_type),
        is_running: m.is_running,
        is_finalised: m.is_finalised,
        start_date: m.start_date,
        end_date: m.end_date,
        image_url: m.image_url,
        created_at: m.created_at,
    }
}

pub(crate) fn reservation_from_model(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        tour_package_id: m.tour_package_id,
        user_id: m.user_id,
        vacancies_reserved: m.vacancies_reserved,
        amount: m.amount,
        confirmed: m.confirmed,
        canceled: m.canceled,
        payment_reference: m.payment_reference,
        created_at: m.created_at,
        confirmed_at: m.confirmed_at,
        canceled_at: m.canceled_at,
    }
}

pub(crate) fn reservation_to_active(r: &Reservation) -> reservation::ActiveModel {
    use sea_orm::Set;
    reservation::ActiveModel {
        id: Set(r.id.clone()),
        tour_package_id: Set(r.tour_package_id.clone()),
        user_id: Set(r.user_id.clone()),
        vacancies_reserved: Set(r.vacancies_reserved),
        amount: Set(r.amount),
        confirmed: Set(r.confirmed),
        canceled: Set(r.canceled),
        payment_reference: Set(r.payment_reference.clone()),
        created_at: Set(r.created_at),
        confirmed_at: Set(r.confirmed_at),
        canceled_at: Set(r.canceled_at),
    }
}

pub(crate) fn entry_from_model(m: ledger_entry::Model) -> LedgerEntry {
    LedgerEntry {
        id: m.id,
        entry_type: entry_type_from_db(m.entry_type),
        amount: m.amount,
        owner_id: m.owner_id,
        owner_role: role_from_db(m.owner_role),
        reservation_id: m.reservation_id,
        related_entry_id: m.related_entry_id,
        offsets: m.offsets.map(entry_type_from_db),
        created_at: m.created_at,
    }
}

pub(crate) fn entry_to_active(e: &LedgerEntry) -> ledger_entry::ActiveModel {
    use sea_orm::Set;
    ledger_entry::ActiveModel {
        id: Set(e.id.clone()),
        entry_type: Set(entry_type_to_db(e.entry_type)),
        amount: Set(e.amount),
        owner_id: Set(e.owner_id.clone()),
        owner_role: Set(role_to_db(e.owner_role)),
        reservation_id: Set(e.reservation_id.clone()),
        related_entry_id: Set(e.related_entry_id.clone()),
        offsets: Set(e.offsets.map(entry_type_to_db)),
        created_at: Set(e.created_at),
    }
}
