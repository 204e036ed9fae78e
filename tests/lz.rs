use contract_codecs::lz::tie_break::{CoinFlip, KeepFirst, KeepLast};
use contract_codecs::lz::{
    compress, compress_with, decompress, LzDecoder, LzEncoder,
};
use contract_codecs::{Context, Decoder, Encoder, Error, TieBreak};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

const POLICIES: [TieBreak; 4] = [
    TieBreak::KeepFirst,
    TieBreak::KeepLast,
    TieBreak::Random { seed: Some(1) },
    TieBreak::Random { seed: None },
];

fn round_trip(input: &str) {
    for policy in POLICIES {
        let mut compressed = String::new();
        let ctx = Context::new(policy);

        {
            let mut encoder = LzEncoder::new(input, &mut compressed, ctx);
            let written = encoder.encode().unwrap();
            assert_eq!(written, compressed.chars().count());
        }

        let mut decompressed = String::new();
        {
            let mut decoder = LzDecoder::new(&compressed, &mut decompressed);
            let (consumed, written) = decoder.decode().unwrap();
            assert_eq!(consumed, compressed.chars().count());
            assert_eq!(written, input.chars().count());
        }
        assert_eq!(decompressed, input);
    }
}

/// The length of a stream that only uses literals.
fn literal_only_len(input: &str) -> usize {
    let len = input.chars().count();
    let tokens = (len + 8) / 9;
    // Every literal token but the last is followed by an empty reference.
    len + tokens + tokens - 1
}

#[test]
fn test_lz_decoder_const_inputs() {
    assert_eq!(
        decompress("5aaabb450723abb").unwrap(),
        "aaabbaaababababaabb"
    );
    assert_eq!(decompress("3aaa91").unwrap(), "aaaaaaaaaaaa");
    assert_eq!(decompress("4miss433ppi").unwrap(), "mississippi");
    assert_eq!(decompress("2ab").unwrap(), "ab");
    assert_eq!(decompress("").unwrap(), "");
    assert_eq!(decompress("0").unwrap(), "");
    assert_eq!(decompress("1a0").unwrap(), "a");
}

#[test]
fn test_lz_encoder_const_inputs() {
    let ctx = Context::default();
    assert_eq!(compress("a", ctx).unwrap(), "1a");
    assert_eq!(compress("ab", ctx).unwrap(), "2ab");
    assert_eq!(compress("aaaaaaaaaaaa", ctx).unwrap(), "3aaa91");
    assert_eq!(compress("mississippi", ctx).unwrap(), "4miss433ppi");
    assert_eq!(compress("abracadabra", ctx).unwrap(), "7abracad47");
    assert_eq!(
        compress("abcdefghijklmnop", ctx).unwrap(),
        "9abcdefghi07jklmnop"
    );
    assert_eq!(
        compress("aaabbaaababababaabb", ctx).unwrap(),
        "5aaabb450723abb"
    );
}

#[test]
fn test_lz_tie_break_policies() {
    let input = "abacabadabacabad";
    let first = compress_with(input, &mut KeepFirst).unwrap();
    let last = compress_with(input, &mut KeepLast).unwrap();
    assert_eq!(first, "4abac341d88");
    assert_eq!(last, "8abacabad88");
    assert_eq!(first.len(), last.len());

    // The same seed gives the same stream.
    let ctx = Context::new(TieBreak::Random { seed: Some(42) });
    assert_eq!(compress(input, ctx).unwrap(), compress(input, ctx).unwrap());

    // Every policy finds an encoding of the optimal length.
    let mut coin = CoinFlip::new(StdRng::seed_from_u64(3));
    for _ in 0..20 {
        let stream = compress_with(input, &mut coin).unwrap();
        assert_eq!(stream.len(), first.len());
        assert_eq!(decompress(&stream).unwrap(), input);
    }
}

#[test]
fn test_lz_encoder_decoder_const_inputs() {
    round_trip("a");
    round_trip("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    round_trip("abcabcabcabcabcabcabcabcabcabcabcabc");
    round_trip("123456789abcdefghijklmno*aaaa aaaa aaaaaaaa");
    round_trip("0123456789");
    round_trip("9999999999990000000000");
    round_trip("héllo wörld, héllo wörld ünïcödé");
    round_trip(
        "
        0152340 c1bc 0012 0000 0000 0100 0000 0000 0000
        0152350 0065 0000 0000 0000 b763 0012 0000 0000
        0152360 0200 0000 0000 0000 0066 0000 0000 0000",
    );
}

#[test]
fn test_lz_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let len = Uniform::new_inclusive(1, 60);

    // Small alphabets produce many repeats, large ones many literals.
    for alphabet in [b'b', b'c', b'e', b'z'] {
        let letters = Uniform::new_inclusive(b'a', alphabet);
        for _ in 0..40 {
            let input: String = (0..len.sample(&mut rng))
                .map(|_| char::from(letters.sample(&mut rng)))
                .collect();
            round_trip(&input);
        }
    }
}

#[test]
fn test_lz_never_longer_than_literals() {
    let mut rng = StdRng::seed_from_u64(17);
    let len = Uniform::new_inclusive(1, 80);
    let letters = Uniform::new_inclusive(b'a', b'z');

    for _ in 0..100 {
        let input: String = (0..len.sample(&mut rng))
            .map(|_| char::from(letters.sample(&mut rng)))
            .collect();
        let stream = compress(&input, Context::default()).unwrap();
        assert!(stream.len() <= literal_only_len(&input));
    }

    // Long runs compress much better than literals.
    let run = "a".repeat(12);
    let stream = compress(&run, Context::default()).unwrap();
    assert!(stream.len() < run.len());
    assert!(stream.len() < literal_only_len(&run));
}

#[test]
fn test_lz_encoder_rejects_empty_input() {
    assert!(matches!(
        compress("", Context::default()),
        Err(Error::PreconditionViolation(_))
    ));
}

#[test]
fn test_lz_decoder_rejects_malformed() {
    let malformed = [
        // Not enough literal characters.
        "9abc",
        "5aaab",
        // A reference without an offset.
        "1a2",
        "3abc3",
        // Offsets out of range.
        "1a20",
        "1a12",
        // Not a digit.
        "x",
        "1ax",
    ];
    for stream in malformed {
        assert!(
            matches!(decompress(stream), Err(Error::MalformedStream { .. })),
            "{} should be rejected",
            stream
        );
    }
}

#[test]
fn test_lz_decoder_leaves_output_on_error() {
    let mut output = String::from("prefix");
    let res = LzDecoder::new("3abc99", &mut output).decode();
    assert!(res.is_err());
    assert_eq!(output, "prefix");
}

#[test]
fn test_lz_decoder_no_crash() {
    let mut rng = StdRng::seed_from_u64(99);
    let symbols: Vec<char> = "0123456789ab".chars().collect();
    let pick = Uniform::new(0, symbols.len());

    for i in 1..200 {
        let stream: String =
            (0..i % 40).map(|_| symbols[pick.sample(&mut rng)]).collect();
        let mut decoded = String::new();
        if let Ok((read, written)) =
            LzDecoder::new(&stream, &mut decoded).decode()
        {
            assert_eq!(read, stream.len());
            assert_eq!(written, decoded.chars().count());
        }
    }
}
