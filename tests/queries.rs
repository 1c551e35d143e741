//! Query-layer tests against a real PostgreSQL database.
//!
//! Each test gets a fresh database with the migrations applied.
//! Run with `DATABASE_URL` set:
//!
//! ```text
//! cargo test --test queries -- --ignored
//! ```

use chrono::NaiveDate;
use lightbnb::{
    AppError,
    models::{
        property::{NewProperty, Property, PropertyFilter},
        reservation::ReservationQuery,
        user::NewUser,
    },
    services,
};
use sqlx::PgPool;

async fn insert_user(pool: &PgPool, name: &str, email: &str) -> i32 {
    sqlx::query_scalar("INSERT INTO users (name, email, password) VALUES ($1, $2, 'hash') RETURNING id")
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn new_property(owner_id: i32, title: &str, city: &str, cost_per_night: i32) -> NewProperty {
    NewProperty {
        owner_id,
        title: title.to_string(),
        description: "description".to_string(),
        thumbnail_photo_url: format!("https://example.com/{}/thumb.jpg", title),
        cover_photo_url: format!("https://example.com/{}/cover.jpg", title),
        cost_per_night,
        parking_spaces: 1,
        number_of_bathrooms: 2,
        number_of_bedrooms: 3,
        country: "Canada".to_string(),
        street: "651 Nami Road".to_string(),
        city: city.to_string(),
        province: "British Columbia".to_string(),
        post_code: "V5K 0A1".to_string(),
    }
}

async fn insert_property(pool: &PgPool, owner_id: i32, title: &str, city: &str, cents: i32) -> i32 {
    services::add_property(pool, new_property(owner_id, title, city, cents))
        .await
        .unwrap()
        .id
}

async fn insert_reservation(
    pool: &PgPool,
    guest_id: i32,
    property_id: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO reservations (guest_id, property_id, start_date, end_date) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(guest_id)
    .bind(property_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_review(pool: &PgPool, guest_id: i32, property_id: i32, rating: i16) {
    let start = date(2020, 1, 1);
    let reservation_id = insert_reservation(pool, guest_id, property_id, start, date(2020, 1, 5)).await;

    sqlx::query(
        "INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating) VALUES ($1, $2, $3, $4)",
    )
    .bind(guest_id)
    .bind(property_id)
    .bind(reservation_id)
    .bind(rating)
    .execute(pool)
    .await
    .unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[sqlx::test]
#[ignore = "requires database"]
async fn unknown_email_is_none(pool: PgPool) {
    let user = services::get_user_with_email(&pool, "nobody@example.com")
        .await
        .unwrap();

    assert!(user.is_none());
}

#[sqlx::test]
#[ignore = "requires database"]
async fn added_user_is_found_by_email_and_id(pool: PgPool) {
    let added = services::add_user(
        &pool,
        NewUser {
            name: "Eva Stanley".to_string(),
            email: "sebastianguerra@ymail.com".to_string(),
            password: "hash".to_string(),
        },
    )
    .await
    .unwrap();

    let by_email = services::get_user_with_email(&pool, "sebastianguerra@ymail.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email, added);
    assert_eq!(by_email.name, "Eva Stanley");

    let by_id = services::get_user_with_id(&pool, added.id).await.unwrap();
    assert_eq!(by_id, Some(added));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn unknown_id_is_none(pool: PgPool) {
    let user = services::get_user_with_id(&pool, 424242).await.unwrap();

    assert!(user.is_none());
}

#[sqlx::test]
#[ignore = "requires database"]
async fn padded_email_round_trips(pool: PgPool) {
    let added = services::add_user(
        &pool,
        NewUser {
            name: " Eva Stanley ".to_string(),
            email: " eva@example.com ".to_string(),
            password: "hash".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(added.name, "Eva Stanley");
    assert_eq!(added.email, "eva@example.com");

    let padded = services::get_user_with_email(&pool, " eva@example.com ")
        .await
        .unwrap();
    assert_eq!(padded, Some(added.clone()));

    let plain = services::get_user_with_email(&pool, "eva@example.com")
        .await
        .unwrap();
    assert_eq!(plain, Some(added));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn duplicate_email_is_a_constraint_violation(pool: PgPool) {
    insert_user(&pool, "Eva Stanley", "eva@example.com").await;

    let err = services::add_user(
        &pool,
        NewUser {
            name: "Someone Else".to_string(),
            email: "eva@example.com".to_string(),
            password: "hash".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn added_property_round_trips(pool: PgPool) {
    let owner = insert_user(&pool, "Owner", "owner@example.com").await;
    let input = new_property(owner, "Speed lamp", "Sotboske", 93061);

    let stored = services::add_property(&pool, input.clone()).await.unwrap();

    let expected = Property {
        id: stored.id,
        owner_id: input.owner_id,
        title: input.title,
        description: input.description,
        thumbnail_photo_url: input.thumbnail_photo_url,
        cover_photo_url: input.cover_photo_url,
        cost_per_night: input.cost_per_night,
        parking_spaces: input.parking_spaces,
        number_of_bathrooms: input.number_of_bathrooms,
        number_of_bedrooms: input.number_of_bedrooms,
        country: input.country,
        street: input.street,
        city: input.city,
        province: input.province,
        post_code: input.post_code,
    };
    assert_eq!(stored, expected);
    assert!(stored.id > 0);
}

#[sqlx::test]
#[ignore = "requires database"]
async fn property_with_unknown_owner_is_a_constraint_violation(pool: PgPool) {
    let err = services::add_property(&pool, new_property(999, "Orphan", "Nowhere", 100))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn unfiltered_search_is_cheapest_first_and_capped(pool: PgPool) {
    let owner = insert_user(&pool, "Owner", "owner@example.com").await;
    for (title, cents) in [("c", 30000), ("a", 10000), ("d", 40000), ("b", 20000)] {
        insert_property(&pool, owner, title, "Vancouver", cents).await;
    }

    let listings = services::get_all_properties(&pool, &PropertyFilter::default(), 3)
        .await
        .unwrap();

    let costs: Vec<i32> = listings.iter().map(|l| l.property.cost_per_night).collect();
    assert_eq!(costs, vec![10000, 20000, 30000]);
    assert!(listings.iter().all(|l| l.average_rating.is_none()));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn minimum_rating_filters_on_the_average(pool: PgPool) {
    let owner = insert_user(&pool, "Owner", "owner@example.com").await;
    let guest = insert_user(&pool, "Guest", "guest@example.com").await;
    let great = insert_property(&pool, owner, "great", "Vancouver", 10000).await;
    let mixed = insert_property(&pool, owner, "mixed", "Vancouver", 20000).await;
    insert_property(&pool, owner, "unreviewed", "Vancouver", 5000).await;

    insert_review(&pool, guest, great, 5).await;
    insert_review(&pool, guest, great, 4).await;
    insert_review(&pool, guest, mixed, 5).await;
    insert_review(&pool, guest, mixed, 2).await;

    let filter = PropertyFilter {
        minimum_rating: Some(4.0),
        ..Default::default()
    };
    let listings = services::get_all_properties(&pool, &filter, 10).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].property.id, great);
    assert_eq!(listings[0].average_rating, Some(4.5));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn price_bounds_are_dollars_and_inclusive(pool: PgPool) {
    let owner = insert_user(&pool, "Owner", "owner@example.com").await;
    for (title, cents) in [
        ("too-cheap", 4999),
        ("low-edge", 5000),
        ("middle", 9900),
        ("high-edge", 15000),
        ("too-dear", 15001),
    ] {
        insert_property(&pool, owner, title, "Vancouver", cents).await;
    }

    let filter = PropertyFilter {
        minimum_price_per_night: Some(50),
        maximum_price_per_night: Some(150),
        ..Default::default()
    };
    let listings = services::get_all_properties(&pool, &filter, 10).await.unwrap();

    let titles: Vec<&str> = listings.iter().map(|l| l.property.title.as_str()).collect();
    assert_eq!(titles, vec!["low-edge", "middle", "high-edge"]);
}

#[sqlx::test]
#[ignore = "requires database"]
async fn city_and_owner_filters_combine(pool: PgPool) {
    let alice = insert_user(&pool, "Alice", "alice@example.com").await;
    let bob = insert_user(&pool, "Bob", "bob@example.com").await;
    let wanted = insert_property(&pool, alice, "wanted", "North Vancouver", 100).await;
    insert_property(&pool, bob, "other-owner", "Vancouver", 100).await;
    insert_property(&pool, alice, "other-city", "Calgary", 100).await;

    let filter = PropertyFilter {
        city: Some("vancouver".to_string()),
        owner_id: Some(alice),
        ..Default::default()
    };
    let listings = services::get_all_properties(&pool, &filter, 10).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].property.id, wanted);
}

#[sqlx::test]
#[ignore = "requires database"]
async fn reservations_are_capped_and_scoped_to_the_guest(pool: PgPool) {
    let owner = insert_user(&pool, "Owner", "owner@example.com").await;
    let guest = insert_user(&pool, "Guest", "guest@example.com").await;
    let other = insert_user(&pool, "Other", "other@example.com").await;
    let property = insert_property(&pool, owner, "cabin", "Banff", 12000).await;

    for day in 1..=7 {
        insert_reservation(&pool, guest, property, date(2021, 3, day), date(2021, 3, day + 1)).await;
    }
    insert_reservation(&pool, other, property, date(2021, 1, 1), date(2021, 1, 2)).await;

    let query = ReservationQuery {
        limit: 5,
        past_only: false,
    };
    let rows = services::get_all_reservations(&pool, guest, query).await.unwrap();

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.reservation.guest_id == guest));
    let starts: Vec<NaiveDate> = rows.iter().map(|r| r.reservation.start_date).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
    assert_eq!(rows[0].title, "cabin");
    assert!(rows.iter().all(|r| r.average_rating.is_none()));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn reservations_carry_the_property_average(pool: PgPool) {
    let owner = insert_user(&pool, "Owner", "owner@example.com").await;
    let guest = insert_user(&pool, "Guest", "guest@example.com").await;
    let property = insert_property(&pool, owner, "cabin", "Banff", 12000).await;

    insert_review(&pool, guest, property, 5).await;
    insert_review(&pool, guest, property, 3).await;

    let rows = services::get_all_reservations(&pool, guest, ReservationQuery::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.average_rating == Some(4.0)));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn past_only_skips_future_stays(pool: PgPool) {
    let owner = insert_user(&pool, "Owner", "owner@example.com").await;
    let guest = insert_user(&pool, "Guest", "guest@example.com").await;
    let property = insert_property(&pool, owner, "cabin", "Banff", 12000).await;

    let past = insert_reservation(&pool, guest, property, date(2019, 6, 1), date(2019, 6, 8)).await;
    insert_reservation(&pool, guest, property, date(2099, 6, 1), date(2099, 6, 8)).await;

    let query = ReservationQuery {
        limit: 10,
        past_only: true,
    };
    let rows = services::get_all_reservations(&pool, guest, query).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].reservation.id, past);
}
