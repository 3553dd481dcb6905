use proptest::prelude::*;
use reg_wizard::{CursorPolicy, Domain, DomainStore, SectionState};

fn any_domain() -> impl Strategy<Value = Domain> {
    prop_oneof![
        Just(Domain::Layout),
        Just(Domain::Equipment),
        Just(Domain::Material),
        Just(Domain::Users),
    ]
}

proptest! {
    #[test]
    fn last_write_wins(domain in any_domain(), steps in prop::collection::vec(-10i64..20, 1..32)) {
        let mut store = DomainStore::new(domain, 1, CursorPolicy::Accept, ());
        for &step in &steps {
            store.set_cursor(step).unwrap();
        }
        prop_assert_eq!(store.get().cursor, *steps.last().unwrap());
        prop_assert_eq!(store.get().revision, steps.len() as u64);
    }

    #[test]
    fn in_range_cursor_activates_exactly_one(domain in any_domain(), pick in 0u32..64) {
        let steps = domain.steps();
        let step = i64::from(pick % steps + 1);
        let mut store = DomainStore::new(domain, 1, CursorPolicy::Accept, ());
        store.set_cursor(step).unwrap();

        let active: Vec<i64> = (1..=i64::from(steps)).filter(|&s| store.is_active(s)).collect();
        prop_assert_eq!(active, vec![step]);
    }

    #[test]
    fn out_of_range_cursor_activates_none(domain in any_domain(), offset in 1i64..1000, below in any::<bool>()) {
        let steps = i64::from(domain.steps());
        let step = if below { 1 - offset } else { steps + offset };
        let mut store = DomainStore::new(domain, 1, CursorPolicy::Accept, ());
        store.set_cursor(step).unwrap();

        prop_assert!(store
            .sections()
            .iter()
            .all(|(_, state)| *state == SectionState::Collapsed));
    }

    #[test]
    fn clamp_always_lands_in_range(domain in any_domain(), step in any::<i64>()) {
        let mut store = DomainStore::new(domain, 1, CursorPolicy::Clamp, ());
        let stored = store.set_cursor(step).unwrap();

        prop_assert!(store.cursor().in_range(stored));
        prop_assert_eq!(store.cursor().active_section(), Some(stored));
    }
}
