use complement::{
    analyze, complement, State, Step, Symbol, TransitionTable, TuringMachine, TuringMachineError,
    COMPLEMENT_TABLE,
};
use proptest::prelude::*;

#[test]
fn shared_table_passes_analysis() {
    assert!(analyze(&COMPLEMENT_TABLE).is_ok());
    assert_eq!(*COMPLEMENT_TABLE, TransitionTable::complement());
}

#[test]
fn stepping_walks_the_tape_left_to_right() {
    let mut machine = TuringMachine::from_input("0110").unwrap();
    let mut heads = vec![machine.head()];

    while machine.step().unwrap() == Step::Continue {
        heads.push(machine.head());
    }

    assert_eq!(heads, vec![0, 1, 2, 3, 4]);
    assert_eq!(machine.state(), State::Halt);
    assert_eq!(machine.head(), 4);
    assert_eq!(machine.symbol(), Symbol::Blank);
    assert_eq!(machine.output(), "1001");
}

#[test]
fn invalid_input_never_reaches_the_machine() {
    assert!(matches!(
        complement("10201"),
        Err(TuringMachineError::InvalidInput {
            position: 2,
            character: '2'
        })
    ));
}

#[test]
fn json_view_of_the_table_lists_every_rule() {
    let json = serde_json::to_value(&*COMPLEMENT_TABLE).unwrap();
    let rules = json["rules"].as_array().unwrap();

    assert_eq!(rules.len(), 6);
    assert!(rules
        .iter()
        .filter(|r| r["next_state"] == "halt")
        .all(|r| r["read"] == "_"));
}

proptest! {
    #[test]
    fn run_matches_bitwise_complement(bits in proptest::collection::vec(any::<bool>(), 0..128)) {
        let input: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        let expected: String = bits.iter().map(|&b| if b { '0' } else { '1' }).collect();

        prop_assert_eq!(complement(&input).unwrap(), expected);
    }
}
