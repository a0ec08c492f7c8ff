use gridiron_game::{
    GenerationConfig, GenerationContext, Intake, PlayerId, Position, Rating, Region,
    generate_player,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn context_for(kind: u8, region: Region, scouting: u8, facility: u8) -> GenerationContext {
    match kind % 4 {
        0 => GenerationContext::high_school(
            region,
            Intake::Freshman,
            Rating::from(scouting),
            Rating::from(facility),
        ),
        1 => GenerationContext::high_school(
            region,
            Intake::InitialRoster,
            Rating::from(scouting),
            Rating::from(facility),
        ),
        2 => GenerationContext::college(region, Intake::WalkOn),
        _ => GenerationContext::professional(region),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_players_respect_every_bound(
        seed in any::<u64>(),
        kind in 0_u8..4,
        region in 0_usize..10,
        position in 0_usize..Position::ALL.len(),
        scouting in 0_u8..=99,
        facility in 0_u8..=99,
    ) {
        let context = context_for(kind, Region::at(region), scouting, facility);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let position = Position::ALL[position];
        let player = generate_player(
            PlayerId(1),
            Some(position),
            &context,
            &GenerationConfig::default(),
            &mut rng,
        );
        prop_assert_eq!(player.position, position);
        for (_, current, ceiling) in player.attributes.iter() {
            prop_assert!(current <= ceiling);
            prop_assert!(ceiling <= player.hidden_ceiling);
            prop_assert!(ceiling.value() <= 99);
        }
        prop_assert!(player.overall() <= player.potential());
    }

    #[test]
    fn generation_is_a_function_of_the_seed(seed in any::<u64>(), kind in 0_u8..4) {
        let context = context_for(kind, Region::Southeast, 50, 50);
        let config = GenerationConfig::default();
        let a = generate_player(
            PlayerId(3),
            None,
            &context,
            &config,
            &mut ChaCha20Rng::seed_from_u64(seed),
        );
        let b = generate_player(
            PlayerId(3),
            None,
            &context,
            &config,
            &mut ChaCha20Rng::seed_from_u64(seed),
        );
        prop_assert_eq!(a, b);
    }
}
