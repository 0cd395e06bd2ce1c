mod common;

use actix_web::{http::{header, StatusCode}, test};
use common::{client::TestClient, TestContext};
use hackathon_teams::types::team::TeamDetail;

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect without Location")
        .to_str()
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn join_request_redirects_back_with_status() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let (leader, leader_token) = client.create_test_user("leader").await;
    let (user, user_token) = client.create_test_user("joiner").await;
    let team_id = client.create_team_with_leader(leader, "Open", 4).await;
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/teams/{team_id}/join"))
        .insert_header(bearer(&user_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        format!("/teams/{team_id}?level=success&status=Join%20request%20sent%20to%20the%20team%20leader")
    );

    let req = test::TestRequest::post()
        .uri(&format!("/teams/{team_id}/join"))
        .insert_header(bearer(&user_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).contains("level=info"));

    // still a single pending request, visible to the leader only
    let req = test::TestRequest::get()
        .uri(&format!("/teams/{team_id}"))
        .insert_header(bearer(&leader_token))
        .to_request();
    let detail: TeamDetail = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail.pending_invitations.len(), 1);
    assert_eq!(detail.pending_invitations[0].invited_user_id, user);
    assert_eq!(detail.pending_invitations[0].message, "User joiner wants to join the team");

    let req = test::TestRequest::get()
        .uri(&format!("/teams/{team_id}"))
        .insert_header(bearer(&user_token))
        .to_request();
    let detail: TeamDetail = test::call_and_read_body_json(&app, req).await;
    assert!(!detail.is_member);
    assert!(detail.pending_invitations.is_empty());
}

#[actix_web::test]
async fn accept_adds_member_and_decline_does_not() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let (leader, leader_token) = client.create_test_user("leader").await;
    let (accepted, _) = client.create_test_user("accepted").await;
    let (declined, _) = client.create_test_user("declined").await;
    let team_id = client.create_team_with_leader(leader, "Picky", 4).await;
    let inv_a = ctx.db.join_team(accepted, team_id).await.unwrap().into_inner();
    let inv_d = ctx.db.join_team(declined, team_id).await.unwrap().into_inner();
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/teams/invite/{}/accept", inv_a.id))
        .insert_header(bearer(&leader_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        format!("/teams/{team_id}?level=success&status=accepted%20joined%20the%20team")
    );

    let req = test::TestRequest::post()
        .uri(&format!("/teams/invite/{}/decline", inv_d.id))
        .insert_header(bearer(&leader_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).contains("level=success"));

    assert_eq!(ctx.db.get_user_by_id(&accepted).await.unwrap().team_id, Some(team_id));
    assert_eq!(ctx.db.get_user_by_id(&declined).await.unwrap().team_id, None);
    assert_eq!(ctx.db.member_count(team_id).await.unwrap(), 2);
}

#[actix_web::test]
async fn non_leader_cannot_accept() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let (leader, _) = client.create_test_user("leader").await;
    let (joiner, joiner_token) = client.create_test_user("joiner").await;
    let team_id = client.create_team_with_leader(leader, "Guarded", 4).await;
    let inv = ctx.db.join_team(joiner, team_id).await.unwrap().into_inner();
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/teams/invite/{}/accept", inv.id))
        .insert_header(bearer(&joiner_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).contains("level=error"));
    assert_eq!(ctx.db.get_user_by_id(&joiner).await.unwrap().team_id, None);
}

#[actix_web::test]
async fn unknown_invitation_is_not_found() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let (_, token) = client.create_test_user("someone").await;
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/teams/invite/4242/accept")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn full_team_refuses_accept() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let (leader, leader_token) = client.create_test_user("leader").await;
    let (first, _) = client.create_test_user("first").await;
    let (late, _) = client.create_test_user("late").await;
    let team_id = client.create_team_with_leader(leader, "Pair", 2).await;

    // both asked while a seat was free
    let inv_first = ctx.db.join_team(first, team_id).await.unwrap().into_inner();
    let inv_late = ctx.db.join_team(late, team_id).await.unwrap().into_inner();
    ctx.db.accept_invitation(leader, inv_first.id).await.unwrap();
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/teams/invite/{}/accept", inv_late.id))
        .insert_header(bearer(&leader_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        format!("/teams/{team_id}?level=error&status=The%20team%20is%20already%20full")
    );
    assert_eq!(ctx.db.get_user_by_id(&late).await.unwrap().team_id, None);
    assert_eq!(ctx.db.member_count(team_id).await.unwrap(), 2);
}

#[actix_web::test]
async fn leader_cannot_leave_but_member_can() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let (leader, leader_token) = client.create_test_user("leader").await;
    let (member, member_token) = client.create_test_user("member").await;
    let team_id = client.create_team_with_leader(leader, "Sticky", 4).await;
    client.add_member(leader, team_id, member).await;
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/teams/{team_id}/leave"))
        .insert_header(bearer(&leader_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let loc = location(&resp);
    assert!(loc.starts_with(&format!("/teams/{team_id}?level=error")));
    assert!(loc.contains("leader%20cannot%20leave"));
    assert_eq!(ctx.db.get_user_by_id(&leader).await.unwrap().team_id, Some(team_id));

    let req = test::TestRequest::post()
        .uri(&format!("/teams/{team_id}/leave"))
        .insert_header(bearer(&member_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/teams?level=success&status=You%20left%20the%20team");
    assert_eq!(ctx.db.get_user_by_id(&member).await.unwrap().team_id, None);
}

#[actix_web::test]
async fn member_of_another_team_cannot_join() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let (a, a_token) = client.create_test_user("a").await;
    let (b, _) = client.create_test_user("b").await;
    client.create_team_with_leader(a, "Mine", 4).await;
    let other = client.create_team_with_leader(b, "Theirs", 4).await;
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/teams/{other}/join"))
        .insert_header(bearer(&a_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).contains("level=error"));
    assert!(ctx.db.find_pending_invitation(other, a).await.unwrap().is_none());
}
