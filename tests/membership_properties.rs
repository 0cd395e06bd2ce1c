//! Random request/accept/decline/leave sequences against a fresh database per case.
//! Requests pile up while seats are free, so accepts race each other for the last ones.

mod common;

use std::collections::HashMap;

use common::{client::TestClient, TestContext};
use hackathon_teams::types::error::AppError;
use proptest::prelude::*;

const USERS: usize = 8;

#[derive(Debug, Clone, Copy)]
enum Step {
    Request(usize),
    Accept(usize),
    Decline(usize),
    Leave(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..USERS).prop_map(Step::Request),
        4 => (0..USERS).prop_map(Step::Accept),
        1 => (0..USERS).prop_map(Step::Decline),
        2 => (0..USERS).prop_map(Step::Leave),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn membership_never_exceeds_capacity(
        max_members in 2i32..=4,
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async move {
            let ctx = TestContext::new().await;
            let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
            let leader = client.create_plain_user("leader").await;
            let team_id = client.create_team_with_leader(leader, "Bounded", max_members).await;
            let mut users = Vec::new();
            for i in 0..USERS {
                users.push(client.create_plain_user(&format!("user{i}")).await);
            }
            // user index -> id of that user's pending request
            let mut pending: HashMap<usize, i32> = HashMap::new();

            for step in steps {
                match step {
                    Step::Request(i) => match ctx.db.join_team(users[i], team_id).await {
                        Ok(inv) => {
                            if let Some(&known) = pending.get(&i) {
                                prop_assert_eq!(known, inv.get().id);
                            }
                            pending.insert(i, inv.get().id);
                        }
                        Err(e) => prop_assert!(
                            matches!(e, AppError::AlreadyMember | AppError::TeamFull),
                            "join failed: {:?}", e
                        ),
                    },
                    Step::Accept(i) => {
                        let Some(&inv) = pending.get(&i) else { continue };
                        let before = ctx.db.member_count(team_id).await.unwrap();
                        match ctx.db.accept_invitation(leader, inv).await {
                            Ok(_) => {
                                prop_assert!(before < max_members as u64, "accepted into a full team");
                                pending.remove(&i);
                            }
                            Err(AppError::TeamFull) => {
                                prop_assert_eq!(before, max_members as u64);
                                let user = ctx.db.get_user_by_id(&users[i]).await.unwrap();
                                prop_assert_eq!(user.team_id, None);
                            }
                            Err(e) => prop_assert!(false, "accept failed: {:?}", e),
                        }
                    }
                    Step::Decline(i) => {
                        let Some(inv) = pending.remove(&i) else { continue };
                        if let Err(e) = ctx.db.decline_invitation(leader, inv).await {
                            prop_assert!(false, "decline failed: {:?}", e);
                        }
                    }
                    Step::Leave(i) => {
                        if let Err(e) = ctx.db.leave_team(users[i], team_id).await {
                            prop_assert!(matches!(e, AppError::NotAMember), "leave failed: {:?}", e);
                        }
                    }
                }

                let count = ctx.db.member_count(team_id).await.unwrap();
                prop_assert!(count <= max_members as u64, "{} members over {}", count, max_members);
                let members = ctx.db.list_members(team_id).await.unwrap();
                prop_assert!(members.iter().any(|m| m.id == leader), "leader lost membership");
            }
            Ok(())
        })?;
    }
}

#[test]
fn accept_time_check_decides_when_requests_outnumber_seats() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    rt.block_on(async {
        let ctx = TestContext::new().await;
        let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
        let leader = client.create_plain_user("leader").await;
        let team_id = client.create_team_with_leader(leader, "Crowded", 3).await;

        let mut invitations = Vec::new();
        for i in 0..5 {
            let user = client.create_plain_user(&format!("user{i}")).await;
            invitations.push(ctx.db.join_team(user, team_id).await.unwrap().into_inner().id);
        }

        let outcomes: Vec<bool> = {
            let mut out = Vec::new();
            for inv in invitations {
                out.push(match ctx.db.accept_invitation(leader, inv).await {
                    Ok(_) => true,
                    Err(AppError::TeamFull) => false,
                    Err(e) => panic!("unexpected {e:?}"),
                });
            }
            out
        };
        assert_eq!(outcomes, vec![true, true, false, false, false]);
        assert_eq!(ctx.db.member_count(team_id).await.unwrap(), 3);
    });
}
