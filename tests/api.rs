mod common;

use std::str::FromStr;

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use common::{seed_account, seed_user, setup_db};
use entity::users;
use pagatron::ledger::Ledger;
use pagatron::routes;
use pagatron::utils::jwt::create_jwt_token;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

macro_rules! app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.clone()))
                .app_data(web::Data::new(Ledger::new($db.clone())))
                .service(routes::api::configure_routes()),
        )
        .await
    };
}

fn bearer(user: &users::Model) -> (&'static str, String) {
    let token = create_jwt_token(user).unwrap();
    ("Authorization", format!("Bearer {}", token))
}

/// Status of a call, including errors raised by middleware.
fn status_of<B>(result: Result<ServiceResponse<B>, actix_web::Error>) -> StatusCode {
    match result {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

async fn balance_of(db: &DatabaseConnection, email: &str) -> Decimal {
    Ledger::new(db.clone()).get_balance(email).await.unwrap()
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

#[actix_web::test]
async fn health_and_index_respond() {
    let db = setup_db().await;
    let app = app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn register_login_and_validate_key() {
    let db = setup_db().await;
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({"name": "Alice", "email": ALICE, "password": "password123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], ALICE);
    assert!(body["data"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({"name": "Alice", "email": ALICE, "password": "password123"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({"email": ALICE, "password": "password123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/users/validateUserKey")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "user");
    assert_eq!(body["is_admin"], false);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({"email": ALICE, "password": "wrong-password"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn protected_routes_require_a_token() {
    let db = setup_db().await;
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/transactions/send")
        .set_json(json!({"sender_email": ALICE, "recipient_email": BOB, "amount": "5"}))
        .to_request();
    assert_eq!(
        status_of(test::try_call_service(&app, req).await),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/cards/balance?user_email=alice@example.com")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    assert_eq!(
        status_of(test::try_call_service(&app, req).await),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn request_accept_and_admin_revoke_over_http() {
    let db = setup_db().await;
    let alice = seed_account(&db, ALICE, 0).await;
    let bob = seed_account(&db, BOB, 100).await;
    let admin = seed_user(&db, "Root", "root@example.com", "admin").await;
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/transactions/request")
        .insert_header(bearer(&alice))
        .set_json(json!({
            "sender_email": ALICE,
            "recipient_email": BOB,
            "amount": "40",
            "message": "concert tickets"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "pending");

    // Only the payer may accept.
    let req = test::TestRequest::post()
        .uri(&format!("/transactions/{}/accept", id))
        .insert_header(bearer(&alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/transactions/pending?user_email=bob@example.com")
        .insert_header(bearer(&bob))
        .to_request();
    let pending: Vec<Value> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(pending.len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("/transactions/{}/accept", id))
        .insert_header(bearer(&bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "completed");

    let req = test::TestRequest::post()
        .uri(&format!("/transactions/{}/accept", id))
        .insert_header(bearer(&bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_state");

    let req = test::TestRequest::get()
        .uri("/cards/balance?user_email=alice@example.com")
        .insert_header(bearer(&alice))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(decimal(&body["balance"]), Decimal::from(40));

    let req = test::TestRequest::post()
        .uri(&format!("/transactions/{}/revoke", id))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/transactions/{}/revoke", id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    assert_eq!(balance_of(&db, ALICE).await, Decimal::ZERO);
    assert_eq!(balance_of(&db, BOB).await, Decimal::from(100));
}

#[actix_web::test]
async fn send_failures_map_to_client_errors() {
    let db = setup_db().await;
    let alice = seed_account(&db, ALICE, 10).await;
    seed_account(&db, BOB, 0).await;
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/transactions/send")
        .insert_header(bearer(&alice))
        .set_json(json!({"sender_email": ALICE, "recipient_email": BOB, "amount": "40"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "insufficient_funds");

    let req = test::TestRequest::post()
        .uri("/transactions/send")
        .insert_header(bearer(&alice))
        .set_json(json!({"sender_email": ALICE, "recipient_email": BOB, "amount": "0"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["error"], "invalid_input");

    // Cannot spend somebody else's balance.
    let req = test::TestRequest::post()
        .uri("/transactions/send")
        .insert_header(bearer(&alice))
        .set_json(json!({"sender_email": BOB, "recipient_email": ALICE, "amount": "1"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/transactions/send")
        .insert_header(bearer(&alice))
        .set_json(json!({"sender_email": ALICE, "recipient_email": BOB, "amount": "10"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(balance_of(&db, BOB).await, Decimal::from(10));
}

#[actix_web::test]
async fn listings_need_an_email_and_admin_for_everything() {
    let db = setup_db().await;
    let alice = seed_account(&db, ALICE, 10).await;
    let admin = seed_user(&db, "Root", "root@example.com", "admin").await;
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri("/transactions/sent")
        .insert_header(bearer(&alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/transactions")
        .insert_header(bearer(&alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/transactions?page=1&limit=10")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["pagination"]["items_per_page"], 10);

    let req = test::TestRequest::get()
        .uri("/transactions/404")
        .insert_header(bearer(&alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn cards_and_friends_over_http() {
    let db = setup_db().await;
    let alice = seed_user(&db, "Alice", ALICE, "user").await;
    let bob = seed_user(&db, "Bob", BOB, "user").await;
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/cards")
        .insert_header(bearer(&alice))
        .set_json(json!({
            "user_email": ALICE,
            "card_number": "4111111111111111",
            "cardholder_name": "Alice",
            "expiry_date": "10/30"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["card_last4"], "1111");
    assert_eq!(decimal(&body["data"]["balance"]), Decimal::ZERO);

    let req = test::TestRequest::get()
        .uri("/cards?user_email=alice@example.com")
        .insert_header(bearer(&alice))
        .to_request();
    let cards: Vec<Value> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(cards.len(), 1);

    let req = test::TestRequest::post()
        .uri("/friends/request")
        .insert_header(bearer(&alice))
        .set_json(json!({"userEmail": ALICE, "friendEmail": BOB}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let request_id = body["data"]["id"].as_i64().unwrap();

    // The sender cannot accept their own request.
    let req = test::TestRequest::post()
        .uri(&format!("/friends/{}/accept", request_id))
        .insert_header(bearer(&alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/friends/{}/accept", request_id))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/friends/bob@example.com").to_request();
    let friends: Vec<Value> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0]["email"], ALICE);

    let req = test::TestRequest::delete()
        .uri(&format!("/friends/{}/{}", alice.id, bob.id))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn only_admins_fund_new_cards() {
    let db = setup_db().await;
    let alice = seed_user(&db, "Alice", ALICE, "user").await;
    let admin = seed_user(&db, "Root", "root@example.com", "admin").await;
    let app = app!(db);

    let card = |balance: &str| {
        json!({
            "user_email": ALICE,
            "card_number": "4111111111111111",
            "cardholder_name": "Alice",
            "expiry_date": "10/30",
            "opening_balance": balance
        })
    };

    let req = test::TestRequest::post()
        .uri("/cards")
        .insert_header(bearer(&alice))
        .set_json(card("9999999999.99"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    assert!(Ledger::new(db.clone()).get_cards(ALICE).await.unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri("/cards")
        .insert_header(bearer(&admin))
        .set_json(card("25"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    assert_eq!(balance_of(&db, ALICE).await, Decimal::from(25));
}

#[actix_web::test]
async fn stale_token_cannot_act_for_a_reassigned_email() {
    let db = setup_db().await;
    let bob = seed_user(&db, "Bob", BOB, "user").await;
    let app = app!(db);
    let old_token = bearer(&bob);

    let req = test::TestRequest::put()
        .uri(&format!("/users/update/{}", bob.id))
        .insert_header(old_token.clone())
        .set_json(json!({"email": "bob2@example.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    common::seed_card(&db, "bob2@example.com", 0).await;

    // Somebody else now owns the freed address.
    seed_account(&db, BOB, 100).await;

    let req = test::TestRequest::post()
        .uri("/transactions/send")
        .insert_header(old_token.clone())
        .set_json(json!({"sender_email": BOB, "recipient_email": "bob2@example.com", "amount": "100"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(balance_of(&db, BOB).await, Decimal::from(100));
    assert_eq!(balance_of(&db, "bob2@example.com").await, Decimal::ZERO);

    // The same token speaks for the renamed account.
    let req = test::TestRequest::post()
        .uri("/users/validateUserKey")
        .insert_header(old_token)
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["email"], "bob2@example.com");
}

#[actix_web::test]
async fn tokens_follow_role_changes_and_deletion() {
    let db = setup_db().await;
    let alice = seed_user(&db, "Alice", ALICE, "user").await;
    let admin = seed_user(&db, "Root", "root@example.com", "admin").await;
    let app = app!(db);
    let alice_token = bearer(&alice);

    let req = test::TestRequest::put()
        .uri(&format!("/users/update/{}", alice.id))
        .insert_header(bearer(&admin))
        .set_json(json!({"role": "admin"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/users/getAll")
        .insert_header(alice_token.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/delete/{}", alice.id))
        .insert_header(alice_token.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/users/validateUserKey")
        .insert_header(alice_token)
        .to_request();
    assert_eq!(
        status_of(test::try_call_service(&app, req).await),
        StatusCode::UNAUTHORIZED
    );
}
