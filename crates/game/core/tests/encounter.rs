use combat_core::{
    ActionCommand, ActionError, BestiarySnapshot, CatalogSnapshot, CharacterSnapshot,
    CombatConfig, CombatEnv, CombatOutcome, CombatPhase, CombatSession, CombatantRef, EffectEntry,
    EffectKind, EffectMeaning, EncounterDefinition, EnemyGroup, EnemyTemplate, GroupMember,
    GuestTemplate, InventorySnapshot, ItemDefinition, PartySnapshot, PcgRng, SessionError,
    SpellDefinition, TurnOrderPolicy,
};

fn enemy(id: &str, hp: u32, attack: u32) -> EnemyTemplate {
    EnemyTemplate {
        id: id.into(),
        hp,
        mp: 0,
        attack,
        attack_variance: 0.0,
        defense: 0,
    }
}

fn group(id: &str, members: &[&str]) -> EnemyGroup {
    EnemyGroup {
        id: id.into(),
        members: members.iter().map(|m| GroupMember::new(*m)).collect(),
    }
}

fn bestiary() -> BestiarySnapshot {
    BestiarySnapshot::new()
        .with_enemy(enemy("imp", 10, 6))
        .with_enemy(enemy("brute", 40, 6))
        .with_enemy(enemy("ogre", 60, 20))
        .with_enemy(enemy("titan", 500, 20))
        .with_group(group("pair", &["imp", "brute"]))
        .with_group(group("ogre", &["ogre"]))
        .with_group(group("titan", &["titan"]))
        .with_group(group("empty", &[]))
        .with_group(group("broken", &["imp", "wyrm"]))
        .with_group(EnemyGroup {
            id: "ambush".into(),
            members: vec![GroupMember::new("imp"), GroupMember::branded("brute", "imp")],
        })
        .with_group(EnemyGroup {
            id: "twins".into(),
            members: vec![
                GroupMember::branded("imp", "twin"),
                GroupMember::branded("brute", "twin"),
            ],
        })
        .with_guest(GuestTemplate {
            speaker: "mira".into(),
            hp: 30,
            mp: 0,
            attack: 5,
            attack_variance: 0.0,
            defense: 0,
        })
}

fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::new()
        .with_item(ItemDefinition {
            id: "potion".into(),
            effects: vec![EffectEntry::healing(20)],
        })
        .with_spell(SpellDefinition {
            id: "fire".into(),
            mp_cost: 4,
            effects: vec![EffectEntry::damage(12)],
        })
}

fn hero(index: u32) -> CharacterSnapshot {
    CharacterSnapshot::new(index, 100, 20, 50, 0).with_mp(20)
}

fn start(
    encounter: EncounterDefinition,
    party: PartySnapshot,
    catalog: &CatalogSnapshot,
    bestiary: &BestiarySnapshot,
) -> Result<CombatSession, SessionError> {
    CombatSession::start(
        encounter,
        party,
        InventorySnapshot::new().with_item("potion", 2),
        CombatEnv::new(catalog, bestiary),
        PcgRng::new(11),
        CombatConfig::default(),
    )
}

#[test]
fn player_first_encounter_ends_in_victory() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let encounter = EncounterDefinition::new("pair").with_reward("imp-bounty");
    let mut session = start(encounter, PartySnapshot::new(vec![hero(0)]), &catalog, &bestiary).unwrap();

    let me = CombatantRef::Character(0);
    let imp = CombatantRef::enemy("imp");
    let brute = CombatantRef::enemy("brute");
    assert_eq!(session.active(), Some(&me));

    // One enemy down, one standing: the fight goes on.
    session.submit(env, ActionCommand::attack(me.clone(), imp.clone())).unwrap();
    assert!(!session.is_over());
    assert_eq!(session.profile(&imp).map(|p| p.hp()), Some(0));

    // The fallen imp is skipped.
    assert_eq!(session.active(), Some(&brute));
    let event = session.take_ai_turn(env).unwrap();
    assert_eq!(event.destination, me);
    assert_eq!(event.total(EffectMeaning::Damage), 6);

    session.submit(env, ActionCommand::attack(me.clone(), brute.clone())).unwrap();
    assert_eq!(session.phase(), &CombatPhase::Over(CombatOutcome::Victory));
    assert_eq!(session.active(), None);

    let timestamps: Vec<u64> = session.events().iter().map(|e| e.timestamp).collect();
    assert_eq!(timestamps, vec![0, 1, 2]);

    let result = session.result().unwrap();
    assert!(result.is_victory());
    assert_eq!(result.reward.as_deref(), Some("imp-bounty"));
    assert_eq!(result.defeated_enemies().count(), 2);
    assert_eq!(result.character(0).map(|c| c.hp_delta), Some(-6));
    assert!(result.rollback.is_none());
    assert!(!result.rewards_granted);

    assert!(session.mark_rewards_granted());
    assert!(!session.mark_rewards_granted());
    assert!(session.result().unwrap().rewards_granted);
}

#[test]
fn defeat_hands_back_pre_combat_snapshots() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let party = PartySnapshot::new(vec![hero(0).with_hp(5)]);
    let encounter = EncounterDefinition::new("ogre")
        .with_turn_order(TurnOrderPolicy::EnemiesFirst)
        .with_can_lose(true)
        .with_reward("never");
    let mut session = start(encounter, party.clone(), &catalog, &bestiary).unwrap();

    assert_eq!(session.active(), Some(&CombatantRef::enemy("ogre")));
    session.take_ai_turn(env).unwrap();

    assert_eq!(session.outcome(), Some(CombatOutcome::Defeat));
    let result = session.result().unwrap();
    assert!(result.can_lose);
    assert_eq!(result.reward, None);
    let rollback = result.rollback.unwrap();
    assert_eq!(rollback.party, party);
    assert_eq!(rollback.inventory.count("potion"), 2);

    assert!(!session.mark_rewards_granted());
    assert_eq!(
        session.submit(
            env,
            ActionCommand::attack(CombatantRef::Character(0), CombatantRef::enemy("ogre"))
        ),
        Err(SessionError::CombatOver)
    );
    assert_eq!(session.take_ai_turn(env), Err(SessionError::CombatOver));
}

#[test]
fn wiped_party_is_defeated_at_start_regardless_of_can_lose() {
    let (catalog, bestiary) = (catalog(), bestiary());
    for can_lose in [false, true] {
        let party = PartySnapshot::new(vec![hero(0).with_hp(0), hero(1).with_hp(0)]);
        let encounter = EncounterDefinition::new("ogre").with_can_lose(can_lose);
        let session = start(encounter, party, &catalog, &bestiary).unwrap();
        assert_eq!(session.outcome(), Some(CombatOutcome::Defeat));
        assert!(session.events().is_empty());
    }
}

#[test]
fn fallen_guests_alone_do_not_end_combat() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let party = PartySnapshot::new(vec![hero(0)]).with_guest("mira");
    let encounter =
        EncounterDefinition::new("titan").with_turn_order(TurnOrderPolicy::EnemiesFirst);
    let mut session = start(encounter, party, &catalog, &bestiary).unwrap();

    let mira = CombatantRef::guest("mira");
    for _ in 0..120 {
        if session.profile(&mira).is_none_or(|p| p.is_dead()) {
            break;
        }
        let active = session.active().cloned().unwrap();
        if active.is_character() {
            // Keeps the hero shielded above the titan's attack.
            session
                .submit(env, ActionCommand::defend(active.clone(), active))
                .unwrap();
        } else {
            session.take_ai_turn(env).unwrap();
        }
    }

    assert_eq!(session.profile(&mira).map(|p| p.hp()), Some(0));
    assert!(!session.is_over());
    assert_ne!(session.active(), Some(&mira));
}

#[test]
fn setup_errors() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let party = || PartySnapshot::new(vec![hero(0)]);

    assert_eq!(
        start(EncounterDefinition::new("nowhere"), party(), &catalog, &bestiary).err(),
        Some(SessionError::UnknownEnemyGroup("nowhere".into()))
    );
    assert_eq!(
        start(EncounterDefinition::new("empty"), party(), &catalog, &bestiary).err(),
        Some(SessionError::EmptyEnemyGroup("empty".into()))
    );
    assert_eq!(
        start(EncounterDefinition::new("broken"), party(), &catalog, &bestiary).err(),
        Some(SessionError::UnknownEnemyTemplate {
            group: "broken".into(),
            template: "wyrm".into()
        })
    );
    assert_eq!(
        start(
            EncounterDefinition::new("ogre"),
            party().with_guest("ghost"),
            &catalog,
            &bestiary
        )
        .err(),
        Some(SessionError::UnknownGuestTemplate("ghost".into()))
    );
    assert_eq!(
        start(
            EncounterDefinition::new("ogre"),
            PartySnapshot::new(vec![hero(0).unavailable()]),
            &catalog,
            &bestiary
        )
        .err(),
        Some(SessionError::NoAvailableCharacters)
    );
}

#[test]
fn repeated_references_are_refused_at_start() {
    let (catalog, bestiary) = (catalog(), bestiary());

    assert_eq!(
        start(
            EncounterDefinition::new("twins"),
            PartySnapshot::new(vec![hero(0)]),
            &catalog,
            &bestiary
        )
        .err(),
        Some(SessionError::DuplicateCombatant(CombatantRef::enemy("twin")))
    );
    assert_eq!(
        start(
            EncounterDefinition::new("ogre"),
            PartySnapshot::new(vec![hero(0)]).with_guest("mira").with_guest("mira"),
            &catalog,
            &bestiary
        )
        .err(),
        Some(SessionError::DuplicateCombatant(CombatantRef::guest("mira")))
    );
    assert_eq!(
        start(
            EncounterDefinition::new("ogre"),
            PartySnapshot::new(vec![hero(0), hero(0)]),
            &catalog,
            &bestiary
        )
        .err(),
        Some(SessionError::DuplicateCombatant(CombatantRef::Character(0)))
    );
}

#[test]
fn branded_member_does_not_shadow_a_plain_one() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let mut session = start(
        EncounterDefinition::new("ambush"),
        PartySnapshot::new(vec![hero(0)]),
        &catalog,
        &bestiary,
    )
    .unwrap();

    let me = CombatantRef::Character(0);
    let plain = CombatantRef::enemy("imp#2");
    let branded = CombatantRef::enemy("imp");
    assert_eq!(session.turn_order(), &[me.clone(), plain.clone(), branded.clone()]);
    assert_eq!(session.profile(&branded).map(|p| p.max_hp()), Some(40));

    session.submit(env, ActionCommand::attack(me.clone(), plain)).unwrap();
    assert!(!session.is_over());
    assert_eq!(session.active(), Some(&branded));
    session.take_ai_turn(env).unwrap();

    session.submit(env, ActionCommand::attack(me, branded)).unwrap();
    assert_eq!(session.outcome(), Some(CombatOutcome::Victory));
}

#[test]
fn unavailable_characters_stay_out_of_the_fight() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let party = PartySnapshot::new(vec![hero(0), hero(1).unavailable(), hero(2)]);
    let session = start(EncounterDefinition::new("ogre"), party, &catalog, &bestiary).unwrap();

    assert!(session.profile(&CombatantRef::Character(1)).is_none());
    assert_eq!(
        session.turn_order(),
        &[
            CombatantRef::Character(0),
            CombatantRef::Character(2),
            CombatantRef::enemy("ogre"),
        ]
    );
}

#[test]
fn turn_ownership_is_enforced() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let mut session =
        start(EncounterDefinition::new("ogre"), PartySnapshot::new(vec![hero(0)]), &catalog, &bestiary)
            .unwrap();

    let err = session
        .submit(
            env,
            ActionCommand::attack(CombatantRef::enemy("ogre"), CombatantRef::Character(0)),
        )
        .unwrap_err();
    assert!(matches!(err, SessionError::NotActiveCombatant { .. }));

    assert_eq!(
        session.take_ai_turn(env),
        Err(SessionError::NotAiControlled(CombatantRef::Character(0)))
    );
    assert!(session.events().is_empty());
}

#[test]
fn rejected_healing_keeps_turn_and_inventory() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let party = PartySnapshot::new(vec![hero(0), hero(1).with_hp(0)]);
    let mut session = start(EncounterDefinition::new("ogre"), party, &catalog, &bestiary).unwrap();

    let err = session
        .submit(
            env,
            ActionCommand::item(
                CombatantRef::Character(0),
                CombatantRef::Character(1),
                "potion",
            ),
        )
        .unwrap_err();

    assert!(matches!(
        err.action_error(),
        Some(ActionError::NoEligibleEffect(..))
    ));
    assert_eq!(session.profile(&CombatantRef::Character(1)).map(|p| p.hp()), Some(0));
    assert_eq!(session.inventory().count("potion"), 2);
    assert_eq!(session.active(), Some(&CombatantRef::Character(0)));
    assert_eq!(session.sequence(), 0);
    assert!(session.events().is_empty());
}

#[test]
fn self_defense_outlasts_the_defenders_own_tick() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let party = PartySnapshot::new(vec![hero(0), hero(1)]);
    let mut session = start(EncounterDefinition::new("ogre"), party, &catalog, &bestiary).unwrap();

    let first = CombatantRef::Character(0);
    let second = CombatantRef::Character(1);

    let event = session
        .submit(env, ActionCommand::defend(first.clone(), first.clone()))
        .unwrap();
    assert!(event.values.is_empty());

    // Placed with 3 turns, one consumed by the defender's own tick.
    let shield = session.effects().get(&first, EffectKind::Defense).unwrap();
    assert_eq!((shield.value, shield.remaining_turns), (50, 2));

    session
        .submit(env, ActionCommand::defend(second.clone(), first.clone()))
        .unwrap();
    let shield = session.effects().get(&first, EffectKind::Defense).unwrap();
    assert_eq!((shield.value, shield.remaining_turns), (50, 2));

    // Ogre hits 20 into 50 defense.
    let event = session.take_ai_turn(env).unwrap();
    if event.destination == first {
        assert_eq!(event.total(EffectMeaning::Damage), 0);
    }
}

#[test]
fn guest_hits_the_weakest_enemy() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let party = PartySnapshot::new(vec![hero(0)]).with_guest("mira");
    let mut session = start(EncounterDefinition::new("pair"), party, &catalog, &bestiary).unwrap();

    // Hero scratches the brute with fire so it is still the stronger one.
    session
        .submit(
            env,
            ActionCommand::spell(
                CombatantRef::Character(0),
                CombatantRef::enemy("brute"),
                "fire",
            ),
        )
        .unwrap();
    assert_eq!(session.active(), Some(&CombatantRef::guest("mira")));
    assert!(session.is_ai_controlled(&CombatantRef::guest("mira")));

    let event = session.take_ai_turn(env).unwrap();
    assert_eq!(event.destination, CombatantRef::enemy("imp"));
    assert_eq!(
        session.profile(&CombatantRef::Character(0)).map(|p| p.mp()),
        Some(16)
    );
}

#[test]
fn event_cursor_only_returns_new_events() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);
    let mut session =
        start(EncounterDefinition::new("pair"), PartySnapshot::new(vec![hero(0)]), &catalog, &bestiary)
            .unwrap();

    let mut cursor = 0;
    session
        .submit(
            env,
            ActionCommand::attack(CombatantRef::Character(0), CombatantRef::enemy("brute")),
        )
        .unwrap();
    assert_eq!(session.events_since(cursor).len(), 1);
    cursor = session.events().len();

    session.take_ai_turn(env).unwrap();
    session
        .submit(
            env,
            ActionCommand::attack(CombatantRef::Character(0), CombatantRef::enemy("imp")),
        )
        .unwrap();
    let fresh = session.events_since(cursor);
    assert_eq!(fresh.len(), 2);
    assert_eq!(fresh[0].timestamp, 1);
}

#[test]
fn external_effects_need_a_known_owner() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let mut session =
        start(EncounterDefinition::new("ogre"), PartySnapshot::new(vec![hero(0)]), &catalog, &bestiary)
            .unwrap();
    assert_eq!(
        session.apply_effect(&CombatantRef::enemy("wyrm"), EffectKind::Poison, 2, 2),
        Err(SessionError::UnknownCombatant(CombatantRef::enemy("wyrm")))
    );

    let ogre = CombatantRef::enemy("ogre");
    session.apply_effect(&ogre, EffectKind::Poison, 3, 2).unwrap();
    assert_eq!(
        session.effects().get(&ogre, EffectKind::Poison).map(|e| e.value),
        Some(3)
    );
    session.apply_effect(&ogre, EffectKind::Poison, 3, 0).unwrap();
    assert!(session.effects().get(&ogre, EffectKind::Poison).is_none());
}

#[test]
fn random_order_is_fixed_by_the_seed() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let party = || PartySnapshot::new(vec![hero(0), hero(1), hero(2)]).with_guest("mira");
    let encounter = || EncounterDefinition::new("pair").with_turn_order(TurnOrderPolicy::Random);

    let a = start(encounter(), party(), &catalog, &bestiary).unwrap();
    let b = start(encounter(), party(), &catalog, &bestiary).unwrap();
    assert_eq!(a.turn_order(), b.turn_order());
    assert_eq!(a.turn_order().len(), 6);
}

#[test]
fn autoplay_always_reaches_an_outcome() {
    let (catalog, bestiary) = (catalog(), bestiary());
    let env = CombatEnv::new(&catalog, &bestiary);

    for seed in 0..20 {
        let party = PartySnapshot::new(vec![
            CharacterSnapshot::new(0, 40, 0, 9, 1),
            CharacterSnapshot::new(1, 35, 0, 7, 0),
        ])
        .with_guest("mira");
        let mut session = CombatSession::start(
            EncounterDefinition::new("pair").with_turn_order(TurnOrderPolicy::Random),
            party,
            InventorySnapshot::new(),
            env,
            PcgRng::new(seed),
            CombatConfig::default(),
        )
        .unwrap();

        for _ in 0..500 {
            let Some(active) = session.active().cloned() else {
                break;
            };
            if session.is_ai_controlled(&active) {
                session.take_ai_turn(env).unwrap();
            } else {
                let target = session
                    .profiles()
                    .find(|p| p.reference().is_enemy() && p.is_alive())
                    .map(|p| p.reference().clone())
                    .unwrap();
                session.submit(env, ActionCommand::attack(active, target)).unwrap();
            }
        }

        assert!(session.is_over(), "seed {seed} never finished");
        let result = session.result().unwrap();
        assert_eq!(result.events.len() as u64, session.sequence());
    }
}
