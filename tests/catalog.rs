use contract_codecs::catalog::Contract;
use contract_codecs::error::Precondition;
use contract_codecs::{Context, Error, TieBreak};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_lookup() {
    for contract in Contract::ALL {
        assert_eq!(contract.key().parse::<Contract>().unwrap(), contract);
        assert_eq!(contract.name().parse::<Contract>().unwrap(), contract);
    }
    assert!(matches!(
        "spiral".parse::<Contract>(),
        Err(Error::UnknownContract(_))
    ));
}

#[test]
fn test_solve_examples() {
    let ctx = Context::default();
    let solve = |c: Contract| c.solve(c.example(), ctx).unwrap();

    assert_eq!(solve(Contract::RleCompression), "5a1b3c");
    assert_eq!(solve(Contract::LzDecompression), "aaabbaaababababaabb");
    assert_eq!(solve(Contract::LzCompression), "7abracad47");
    assert_eq!(solve(Contract::HammingEncode), "1001101011");
    assert_eq!(solve(Contract::HammingDecode), "21");
}

#[test]
fn test_solve_strips_task_glue() {
    let ctx = Context::default();
    assert_eq!(
        Contract::RleCompression.solve("\"aaab\"\n", ctx).unwrap(),
        "3a1b"
    );
    assert_eq!(
        Contract::HammingEncode.solve(" 8 \n", ctx).unwrap(),
        "11110000"
    );
    assert_eq!(
        Contract::HammingDecode.solve("11110001\n", ctx).unwrap(),
        "8"
    );
}

#[test]
fn test_solve_errors() {
    let ctx = Context::default();
    assert!(matches!(
        Contract::HammingEncode.solve("-3", ctx),
        Err(Error::PreconditionViolation(Precondition::NegativeInteger(_)))
    ));
    assert!(matches!(
        Contract::LzCompression.solve("", ctx),
        Err(Error::PreconditionViolation(Precondition::EmptyInput))
    ));
    assert!(matches!(
        Contract::LzDecompression.solve("9ab", ctx),
        Err(Error::MalformedStream { .. })
    ));
    assert!(matches!(
        Contract::HammingDecode.solve("10x1", ctx),
        Err(Error::InvalidCodeword(_))
    ));
}

#[test]
fn test_verify() {
    let ctx = Context::default();
    for contract in Contract::ALL {
        let answer = contract.solve(contract.example(), ctx).unwrap();
        assert!(contract.verify(contract.example(), &answer, ctx).unwrap());
    }

    assert!(!Contract::RleCompression.verify("aab", "1a2b", ctx).unwrap());
    assert!(!Contract::HammingDecode
        .verify("1001101011", "20", ctx)
        .unwrap());
    // A valid but wasteful stream for "aaaa".
    assert!(!Contract::LzDecompression
        .verify("1a01a01a01a", "aaaa", ctx)
        .unwrap());
}

#[test]
fn test_verify_rejects_wasteful_compression() {
    let ctx = Context::default();

    // Both decode to the task, but only the optimal stream is an answer.
    assert!(Contract::LzCompression.verify("aaaa", "1a31", ctx).unwrap());
    assert!(!Contract::LzCompression
        .verify("aaaa", "1a01a01a01a", ctx)
        .unwrap());

    // Runs must be written with as few pairs as possible.
    assert!(Contract::RleCompression.verify("aaaaaa", "6a", ctx).unwrap());
    assert!(!Contract::RleCompression
        .verify("aaaaaa", "3a3a", ctx)
        .unwrap());
    assert!(!Contract::RleCompression
        .verify("aaaaaaaaaaaa", "6a6a", ctx)
        .unwrap());
}

#[test]
fn test_verify_hamming_words_with_leading_zeros() {
    let ctx = Context::default();

    // Seven bits carry three data bits, all of them zero.
    assert_eq!(Contract::HammingDecode.solve("0000000", ctx).unwrap(), "0");
    assert!(Contract::HammingDecode.verify("0000000", "0", ctx).unwrap());
    // The same word with its parity bit at index 4 flipped.
    assert!(Contract::HammingDecode.verify("0000100", "0", ctx).unwrap());
    assert!(!Contract::HammingDecode.verify("0000000", "1", ctx).unwrap());
}

#[test]
fn test_generated_tasks_are_solvable() {
    let ctx = Context::new(TieBreak::Random { seed: Some(5) });
    let mut rng = StdRng::seed_from_u64(11);

    for contract in Contract::ALL {
        for _ in 0..25 {
            let task = contract.generate(&mut rng).unwrap();
            let answer = contract.solve(&task, ctx).unwrap();
            assert!(contract.verify(&task, &answer, ctx).unwrap(), "{}", task);
        }
    }
}
