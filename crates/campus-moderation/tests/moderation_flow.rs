//! End-to-end moderation workflow tests
//!
//! Drives the full path: seeded archetype roles, actors loaded from the
//! role store, policy-gated transitions against the submission store.

use std::sync::Arc;

use campus_moderation::{
    MemorySubmissionStore, ModerationError, ModerationService, ModerationStatus,
};
use campus_policy::{PolicyEngine, TracingObserver};
use campus_rbac::{seed_archetypes, MemoryRoleStore, RoleStore, ADMINISTRATOR, COURSE_OWNER};
use uuid::Uuid;

struct Fixture {
    roles: MemoryRoleStore,
    service: ModerationService,
}

async fn fixture() -> Fixture {
    let roles = MemoryRoleStore::new();
    seed_archetypes(&roles).await.unwrap();

    let engine = PolicyEngine::with_observer(Arc::new(TracingObserver));
    let service = ModerationService::new(engine, Arc::new(MemorySubmissionStore::new()));
    Fixture { roles, service }
}

async fn actor_with_role(store: &MemoryRoleStore, role_name: &str) -> campus_rbac::Actor {
    let role = store.find_by_name(role_name).await.unwrap().unwrap();
    let actor_id = Uuid::now_v7();
    store.assign_role(actor_id, role.id, None).await.unwrap();
    store.load_actor(actor_id).await.unwrap()
}

#[tokio::test]
async fn course_owner_decides_submitted_material() {
    let fx = fixture().await;
    let teacher = actor_with_role(&fx.roles, COURSE_OWNER).await;
    let student_id = Uuid::now_v7();

    // A student submits into the teacher's course
    let submission = fx
        .service
        .submit(Uuid::now_v7(), student_id, teacher.id)
        .await
        .unwrap();
    assert_eq!(submission.status, ModerationStatus::Pending);
    assert_eq!(fx.service.pending_queue(&teacher).await.unwrap().len(), 1);

    // The course owner approves it
    let decided = fx.service.approve(&teacher, submission.id).await.unwrap();
    assert_eq!(decided.status, ModerationStatus::Approved);

    // Approving again reports "already decided"
    let err = fx.service.approve(&teacher, submission.id).await.unwrap_err();
    assert!(matches!(err, ModerationError::InvalidTransition { .. }));
    assert!(fx.service.pending_queue(&teacher).await.unwrap().is_empty());
}

#[tokio::test]
async fn outsider_cannot_decide_and_status_stays_pending() {
    let fx = fixture().await;
    let teacher = actor_with_role(&fx.roles, COURSE_OWNER).await;

    let submission = fx
        .service
        .submit(Uuid::now_v7(), Uuid::now_v7(), teacher.id)
        .await
        .unwrap();

    // A zero-role actor has neither the capability nor the ownership
    let outsider = fx.roles.load_actor(Uuid::now_v7()).await.unwrap();
    let err = fx.service.approve(&outsider, submission.id).await.unwrap_err();
    assert!(matches!(err, ModerationError::Forbidden(_)));

    let queue = fx.service.pending_queue(&teacher).await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].status, ModerationStatus::Pending);
}

#[tokio::test]
async fn administrator_cannot_decide_for_a_foreign_course() {
    let fx = fixture().await;
    let teacher = actor_with_role(&fx.roles, COURSE_OWNER).await;
    let admin = actor_with_role(&fx.roles, ADMINISTRATOR).await;

    let submission = fx
        .service
        .submit(Uuid::now_v7(), Uuid::now_v7(), teacher.id)
        .await
        .unwrap();

    // approve_material is owner-only; Any-scoped capabilities do not
    // reach it
    let err = fx.service.approve(&admin, submission.id).await.unwrap_err();
    assert!(matches!(err, ModerationError::Forbidden(_)));

    // The admin can still decide submissions into their own course
    let own_course = fx
        .service
        .submit(Uuid::now_v7(), Uuid::now_v7(), admin.id)
        .await
        .unwrap();
    let decided = fx.service.reject(&admin, own_course.id).await.unwrap();
    assert_eq!(decided.status, ModerationStatus::Rejected);
}

#[tokio::test]
async fn racing_moderators_cannot_double_decide() {
    let fx = fixture().await;
    let teacher = actor_with_role(&fx.roles, COURSE_OWNER).await;

    let submission = fx
        .service
        .submit(Uuid::now_v7(), Uuid::now_v7(), teacher.id)
        .await
        .unwrap();

    // Both decisions race on the same pending submission; exactly one
    // CAS wins.
    let approve = fx.service.approve(&teacher, submission.id).await;
    let reject = fx.service.reject(&teacher, submission.id).await;

    assert!(approve.is_ok());
    assert!(matches!(
        reject.unwrap_err(),
        ModerationError::InvalidTransition {
            from: ModerationStatus::Approved
        }
    ));
}

#[tokio::test]
async fn teacher_uploading_into_own_course_skips_the_queue() {
    let fx = fixture().await;
    let teacher = actor_with_role(&fx.roles, COURSE_OWNER).await;

    let submission = fx
        .service
        .submit(Uuid::now_v7(), teacher.id, teacher.id)
        .await
        .unwrap();

    assert_eq!(submission.status, ModerationStatus::Approved);
    assert_eq!(submission.decided_by, Some(teacher.id));
    assert!(fx.service.pending_queue(&teacher).await.unwrap().is_empty());
}
