use rand_chacha::ChaCha8Rng;
use rand_core::{OsRng, RngCore, SeedableRng};
use rlnc_codec::{SegmentDecoder, SegmentEncoder};
use rlnc_core::RlncError;

fn random_segment(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

#[test]
fn test_lossy_channel_recovery() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let segment = random_segment(&mut rng, 1000);
    let k = 8;

    let encoder = SegmentEncoder::new(&segment, k).unwrap();
    assert_eq!(encoder.packet_len(), k + 125);
    let mut decoder = SegmentDecoder::new(segment.len(), k).unwrap();
    assert_eq!(decoder.segment().unwrap_err(), RlncError::InvalidState);

    let mut sent = 0;
    while !decoder.is_decoded() && sent < 200 {
        let packet = encoder.next_packet(&mut rng).unwrap();
        sent += 1;
        // every third packet is lost
        if sent % 3 == 0 {
            continue;
        }
        decoder.add_packet(&packet).unwrap();
    }

    assert!(decoder.is_decoded());
    assert_eq!(decoder.rank(), k);
    assert_eq!(decoder.segment().unwrap(), segment);
}

#[test]
fn test_uneven_segment_is_padded() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let segment = random_segment(&mut rng, 1001);
    let k = 8;

    let encoder = SegmentEncoder::new(&segment, k).unwrap();
    assert_eq!(encoder.config().payload_len, 126);

    let mut decoder = SegmentDecoder::new(segment.len(), k).unwrap();
    for id in (0..k).rev() {
        assert!(decoder.add_packet(&encoder.systematic_packet(id).unwrap()).unwrap());
        // systematic blocks decode on arrival
        assert_eq!(decoder.decoded_count(), k - id);
        let (decoded_id, block) = decoder.decoded_packet(k - id - 1).unwrap();
        assert_eq!(decoded_id, id);
        assert_eq!(block.len(), 126);
    }

    // last block carries 1001 - 7 * 126 = 119 bytes plus padding
    let (_, last) = decoder.decoded_packet(0).unwrap();
    assert_eq!(&last[..119], &segment[7 * 126..]);
    assert!(last[119..].iter().all(|&b| b == 0));

    assert_eq!(decoder.segment().unwrap(), segment);
}

#[test]
fn test_wrong_packet_length() {
    let mut decoder = SegmentDecoder::new(64, 4).unwrap();
    assert_eq!(decoder.packet_len(), 4 + 16);
    assert_eq!(decoder.add_packet(&[0u8; 19]).unwrap_err(), RlncError::WireFormatError);
    assert_eq!(decoder.add_packet(&[0u8; 21]).unwrap_err(), RlncError::WireFormatError);

    // well-formed but all-zero: dependent, not an error
    assert!(!decoder.add_packet(&[0u8; 20]).unwrap());
    assert_eq!(decoder.rank(), 0);
}

#[test]
fn test_relay_never_exceeds_its_rank() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let segment = random_segment(&mut rng, 320);
    let k = 10;

    let encoder = SegmentEncoder::new(&segment, k).unwrap();
    let mut relay = SegmentDecoder::new(segment.len(), k).unwrap();
    assert_eq!(relay.recoded_packet(&mut OsRng).unwrap_err(), RlncError::InvalidState);

    for _ in 0..4 {
        relay.add_packet(&encoder.next_packet(&mut rng).unwrap()).unwrap();
    }
    let relay_rank = relay.rank();

    let mut sink = SegmentDecoder::new(segment.len(), k).unwrap();
    for _ in 0..30 {
        let packet = relay.recoded_packet(&mut rng).unwrap();
        assert_eq!(packet.len(), sink.packet_len());
        sink.add_packet(&packet).unwrap();
    }
    assert_eq!(sink.rank(), relay_rank);
    assert!(!sink.is_decoded());

    // Topping the relay up lets the sink finish through it.
    while !relay.is_decoded() {
        relay.add_packet(&encoder.next_packet(&mut rng).unwrap()).unwrap();
    }
    let mut rounds = 0;
    while !sink.is_decoded() && rounds < 100 {
        sink.add_packet(&relay.recoded_packet(&mut rng).unwrap()).unwrap();
        rounds += 1;
    }
    assert_eq!(sink.segment().unwrap(), segment);
}

#[test]
fn test_invalid_segments() {
    assert!(matches!(SegmentEncoder::new(&[], 4), Err(RlncError::InvalidConfig(_))));
    assert!(matches!(SegmentEncoder::new(&[1, 2, 3], 0), Err(RlncError::InvalidConfig(_))));
    assert!(matches!(SegmentDecoder::new(0, 4), Err(RlncError::InvalidConfig(_))));
    let encoder = SegmentEncoder::new(&[1, 2, 3], 2).unwrap();
    assert_eq!(
        encoder.systematic_packet(2).unwrap_err(),
        RlncError::IndexOutOfRange { index: 2, len: 2 }
    );
}
