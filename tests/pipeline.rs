use huffman::{compress, decompress, CodeTable, Decoder, Encoder, Error, FrequencyTable};

#[test]
fn abracadabra_end_to_end() {
    let input = b"abracadabra";
    let freq = FrequencyTable::from_bytes(input);
    let expected: Vec<(u8, u64)> = vec![(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)];
    assert_eq!(freq.iter().collect::<Vec<_>>(), expected);

    let table = CodeTable::from_frequencies(&freq).unwrap();
    let len = |s: u8| table.get(s).unwrap().len();
    assert!(table.iter().all(|(s, c)| s == b'a' || c.len() > len(b'a')));
    assert!(table.iter().all(|(_, c)| c.len() <= len(b'c') && c.len() <= len(b'd')));

    let container = Encoder::new(table).encode(input).unwrap();
    assert_eq!(decompress(&container).unwrap(), input);
}

#[test]
fn varied_inputs_round_trip() {
    let mut inputs: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"ab".to_vec(),
        b"aaaaaaaaab".to_vec(),
        vec![0u8; 3],
        vec![0xff; 17],
        (0..=255u8).collect(),
        "Ünïcödé text with a \u{1F600} in it\r\n".as_bytes().to_vec(),
    ];
    // a skewed pseudo-random stream
    let mut x: u32 = 0x1234_5678;
    inputs.push(
        (0..10_000)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                (x % 7 * (x % 5)) as u8
            })
            .collect(),
    );

    for input in inputs {
        let container = compress(&input).unwrap();
        assert_eq!(decompress(&container).unwrap(), input);
    }
}

#[test]
fn thousand_a() {
    let input = vec![b'A'; 1000];
    let container = compress(&input).unwrap();
    let (decoder, payload) = Decoder::parse(&container).unwrap();
    assert_eq!(payload.len(), 1000);
    assert_eq!(decoder.decode(payload).unwrap(), input);
}

#[test]
fn skewed_payload_is_smaller() {
    let input = b"aaaaaaaaab";
    let container = compress(input).unwrap();
    let (_, payload) = Decoder::parse(&container).unwrap();
    assert!(payload.len() < 8 * input.len());
}

#[test]
fn determinism_across_runs() {
    let input = b"eeffgghhaabbccdd";
    assert_eq!(compress(input).unwrap(), compress(input).unwrap());
}

#[test]
fn empty_input() {
    assert!(FrequencyTable::from_bytes(b"").is_empty());
    assert!(matches!(compress(b""), Err(Error::EmptyAlphabet)));
}

#[test]
fn corrupted_payload_is_reported_not_panicked() {
    let input = b"the rain in spain stays mainly in the plain";
    let container = compress(input).unwrap();
    for i in header_len(&container)..container.len() {
        for bit in 0..8 {
            let mut c = container.clone();
            c[i] ^= 1 << bit;
            if let Err(e) = decompress(&c) {
                assert!(e.is_corrupt_input(), "{e}");
            }
        }
    }
}

fn header_len(container: &[u8]) -> usize {
    let count = u64::from_le_bytes(container[..8].try_into().unwrap()) as usize;
    let mut pos = 8;
    for _ in 0..count {
        let len = u64::from_le_bytes(container[pos + 1..pos + 9].try_into().unwrap()) as usize;
        pos += 9 + len;
    }
    pos
}
