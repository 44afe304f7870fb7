//! Ordered cascade deletes for characters, campaigns and parties.

use assert_matches::assert_matches;
use sigil_core::combat::FightOutcome;
use sigil_db::models::campaign::{CampaignDeletion, CreateCampaign};
use sigil_db::models::character::{CharacterDeletion, CreateCharacter};
use sigil_db::models::fight::CreateFight;
use sigil_db::models::inventory::{CreateItem, CreateRitual, CreateSkill};
use sigil_db::models::membership::{CreateCampaignMembership, CreatePartyMembership};
use sigil_db::models::party::{CreateParty, PartyDeletion};
use sigil_db::repositories::{
    CampaignMembershipRepo, CampaignRepo, CharacterRepo, FightRepo, ItemRepo,
    PartyMembershipRepo, PartyRepo, RitualRepo, SkillRepo,
};
use sqlx::{PgConnection, PgPool};

async fn character(conn: &mut PgConnection, name: &str) -> i64 {
    CharacterRepo::create(
        conn,
        None,
        &CreateCharacter {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

async fn campaign(conn: &mut PgConnection, name: &str) -> i64 {
    CampaignRepo::create(
        conn,
        &CreateCampaign {
            name: name.to_string(),
            master_name: "GM".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

async fn party(conn: &mut PgConnection, campaign_id: i64, name: &str) -> i64 {
    PartyRepo::create(
        conn,
        campaign_id,
        &CreateParty {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

async fn join_campaign(conn: &mut PgConnection, campaign_id: i64, character_id: i64) {
    CampaignMembershipRepo::create(
        conn,
        campaign_id,
        &CreateCampaignMembership {
            character_id,
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

async fn join_party(conn: &mut PgConnection, party_id: i64, character_id: i64) {
    PartyMembershipRepo::create(
        conn,
        party_id,
        &CreatePartyMembership {
            character_id,
            role: None,
        },
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn campaign_delete_removes_parties_and_memberships(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let ordo = campaign(&mut tx, "Ordo").await;
    let a = character(&mut tx, "A").await;
    let b = character(&mut tx, "B").await;
    let c = character(&mut tx, "C").await;
    for id in [a, b, c] {
        join_campaign(&mut tx, ordo, id).await;
    }
    let team_a = party(&mut tx, ordo, "Team A").await;
    let team_b = party(&mut tx, ordo, "Team B").await;
    join_party(&mut tx, team_a, a).await;
    join_party(&mut tx, team_b, b).await;
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let report = CampaignRepo::delete_cascade(&mut tx, ordo)
        .await
        .unwrap()
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(
        report,
        CampaignDeletion {
            party_memberships: 2,
            parties: 2,
            campaign_memberships: 3,
        }
    );

    let mut conn = pool.acquire().await.unwrap();
    assert!(CampaignRepo::find_by_id(&mut conn, ordo).await.unwrap().is_none());
    for party_id in [team_a, team_b] {
        assert!(PartyRepo::find_in_campaign(&mut conn, ordo, party_id)
            .await
            .unwrap()
            .is_none());
    }
    for id in [a, b, c] {
        assert!(CampaignMembershipRepo::find(&mut conn, ordo, id)
            .await
            .unwrap()
            .is_none());
        // Characters themselves survive.
        assert!(CharacterRepo::exists(&mut conn, id).await.unwrap());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn character_delete_removes_everything_referencing_it(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let ordo = campaign(&mut tx, "Ordo").await;
    let hero = character(&mut tx, "Hero").await;
    let rival = character(&mut tx, "Rival").await;
    join_campaign(&mut tx, ordo, hero).await;
    join_campaign(&mut tx, ordo, rival).await;
    let team = party(&mut tx, ordo, "Team").await;
    join_party(&mut tx, team, hero).await;

    for (attacker, defender) in [(hero, rival), (rival, hero)] {
        FightRepo::create(
            &mut tx,
            &CreateFight {
                character_id: attacker,
                opponent_id: defender,
                outcome: FightOutcome::Draw,
                experience: 25,
            },
        )
        .await
        .unwrap();
    }
    ItemRepo::create(
        &mut tx,
        hero,
        &CreateItem {
            name: "Rope".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    SkillRepo::create(
        &mut tx,
        hero,
        &CreateSkill {
            name: "Stealth".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    RitualRepo::create(
        &mut tx,
        hero,
        &CreateRitual {
            name: "Ward".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let report = CharacterRepo::delete_cascade(&mut tx, hero)
        .await
        .unwrap()
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(
        report,
        CharacterDeletion {
            party_memberships: 1,
            campaign_memberships: 1,
            fights: 2,
            items: 1,
            skills: 1,
            rituals: 1,
        }
    );

    let mut conn = pool.acquire().await.unwrap();
    assert!(!CharacterRepo::exists(&mut conn, hero).await.unwrap());
    assert!(FightRepo::list_for_character(&mut conn, rival)
        .await
        .unwrap()
        .is_empty());
    assert!(CampaignMembershipRepo::find(&mut conn, ordo, rival)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn party_delete_removes_members_only(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let ordo = campaign(&mut conn, "Ordo").await;
    let hero = character(&mut conn, "Hero").await;
    join_campaign(&mut conn, ordo, hero).await;
    let team = party(&mut conn, ordo, "Team").await;
    join_party(&mut conn, team, hero).await;

    let report = PartyRepo::delete_cascade(&mut conn, ordo, team)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report, PartyDeletion { party_memberships: 1 });

    assert!(PartyRepo::find_in_campaign(&mut conn, ordo, team)
        .await
        .unwrap()
        .is_none());
    assert!(CampaignMembershipRepo::find(&mut conn, ordo, hero)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_missing_rows_reports_none(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    assert!(CharacterRepo::delete_cascade(&mut conn, 42).await.unwrap().is_none());
    assert!(CampaignRepo::delete_cascade(&mut conn, 42).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn restrict_blocks_out_of_order_delete(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let ordo = campaign(&mut conn, "Ordo").await;
    let hero = character(&mut conn, "Hero").await;
    join_campaign(&mut conn, ordo, hero).await;

    let err = sqlx::query("DELETE FROM campaigns WHERE id = $1")
        .bind(ordo)
        .execute(&mut *conn)
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}
