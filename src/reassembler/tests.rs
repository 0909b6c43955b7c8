//! Unit tests for fragment buffering, assembly triggers and eviction.

use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use bytes::Bytes;
use lcmframe_testing::{FragmentSpec, encode_fragment, encode_short, split_message};
use rstest::{fixture, rstest};

use super::*;
use crate::{
    byte_order::read_network_u32,
    error::DecodeError,
    header::{FragmentIndex, FragmentInfo, Header, Magic},
};

#[fixture]
fn now() -> Instant { Instant::now() }

fn fragments(sequence: u32, payload: &[u8], chunk: usize) -> Vec<Datagram> {
    split_message(
        sequence,
        "CHANNEL",
        payload,
        NonZeroUsize::new(chunk).expect("non-zero chunk"),
    )
    .into_iter()
    .map(|wire| decode(wire).expect("fragment decodes"))
    .collect()
}

fn fragment(sequence: u32, number: u16, total: u16, payload: &[u8]) -> Datagram {
    decode(encode_fragment(&FragmentSpec {
        sequence,
        payload_size: 0,
        fragment_offset: 0,
        fragment_number: number,
        total_fragments: total,
        channel: "CHANNEL",
        payload,
    }))
    .expect("fragment decodes")
}

#[rstest]
fn short_datagram_passes_through_untouched(now: Instant) {
    let mut reassembler = Reassembler::new();
    let datagram = decode(encode_short(1, "TEST", b"hello")).expect("short header decodes");

    let message = reassembler
        .push_at(datagram.clone(), now)
        .expect("short datagram accepted")
        .expect("short datagram is complete");

    assert_eq!(message.datagram(), &datagram);
    assert_eq!(message.fragment_count(), 1);
    assert_eq!(reassembler.buffered_len(), 0);
}

#[rstest]
fn in_order_fragments_assemble_original_payload(now: Instant) {
    let mut reassembler = Reassembler::new();
    let payload: Vec<u8> = (0_u8..=99).collect();
    let mut parts = fragments(7, &payload, 30);
    let last = parts.pop().expect("at least one fragment");

    for part in parts {
        assert!(
            reassembler
                .push_at(part, now)
                .expect("fragment accepted")
                .is_none()
        );
    }
    let message = reassembler
        .push_at(last, now)
        .expect("last fragment accepted")
        .expect("message completes");

    assert_eq!(message.payload(), payload.as_slice());
    assert_eq!(message.channel_name(), "CHANNEL");
    assert_eq!(message.header().sequence_number().get(), 7);
    assert_eq!(message.fragment_count(), 4);
}

#[rstest]
fn out_of_order_fragments_assemble_when_last_index_arrives(now: Instant) {
    let mut reassembler = Reassembler::new();
    let second = fragment(3, 1, 3, b"bb");
    let first = fragment(3, 0, 3, b"aa");
    let last = fragment(3, 2, 3, b"cc");

    assert!(reassembler.push_at(second, now).expect("accepted").is_none());
    assert!(reassembler.push_at(first, now).expect("accepted").is_none());
    let message = reassembler
        .push_at(last, now)
        .expect("accepted")
        .expect("message completes");

    assert_eq!(message.payload(), b"aabbcc");
}

#[rstest]
fn early_last_fragment_defers_assembly_until_it_repeats(now: Instant) {
    let mut reassembler = Reassembler::new();
    let last = fragment(4, 1, 2, b"tail");

    assert!(
        reassembler
            .push_at(last.clone(), now)
            .expect("accepted")
            .is_none()
    );
    assert!(
        reassembler
            .push_at(fragment(4, 0, 2, b"head-"), now)
            .expect("accepted")
            .is_none(),
        "only the last-indexed fragment triggers assembly"
    );
    assert_eq!(
        reassembler.pending(SequenceNumber::new(4)),
        Some(PendingStatus {
            received: 2,
            expected: 2,
            complete: false,
        })
    );

    let message = reassembler
        .push_at(last, now)
        .expect("accepted")
        .expect("repeated last fragment completes the message");
    assert_eq!(message.payload(), b"head-tail");
}

#[rstest]
fn missing_fragment_keeps_entry_pending(now: Instant) {
    let mut reassembler = Reassembler::new();

    assert!(
        reassembler
            .push_at(fragment(5, 0, 3, b"a"), now)
            .expect("accepted")
            .is_none()
    );
    assert!(
        reassembler
            .push_at(fragment(5, 2, 3, b"c"), now)
            .expect("accepted")
            .is_none()
    );

    assert_eq!(
        reassembler.pending(SequenceNumber::new(5)),
        Some(PendingStatus {
            received: 2,
            expected: 3,
            complete: false,
        })
    );
}

#[rstest]
fn duplicate_fragment_last_write_wins(now: Instant) {
    let mut reassembler = Reassembler::new();

    reassembler
        .push_at(fragment(6, 0, 2, b"old"), now)
        .expect("accepted");
    reassembler
        .push_at(fragment(6, 0, 2, b"new"), now)
        .expect("accepted");
    let message = reassembler
        .push_at(fragment(6, 1, 2, b"!"), now)
        .expect("accepted")
        .expect("message completes");

    assert_eq!(message.payload(), b"new!");
}

#[rstest]
fn completed_entry_is_evicted_on_next_push(now: Instant) {
    let mut reassembler = Reassembler::new();
    reassembler
        .push_at(fragment(8, 0, 2, b"x"), now)
        .expect("accepted");
    reassembler
        .push_at(fragment(8, 1, 2, b"y"), now)
        .expect("accepted")
        .expect("message completes");

    assert_eq!(
        reassembler.pending(SequenceNumber::new(8)).map(|s| s.complete),
        Some(true)
    );

    let probe = decode(encode_short(99, "PROBE", b"")).expect("probe decodes");
    reassembler.push_at(probe, now).expect("probe accepted");
    assert_eq!(reassembler.buffered_len(), 0);
}

#[rstest]
fn sequence_number_is_reusable_after_completion(now: Instant) {
    let mut reassembler = Reassembler::new();
    for round in [b"one", b"two"] {
        reassembler
            .push_at(fragment(10, 0, 2, round), now)
            .expect("accepted");
        let message = reassembler
            .push_at(fragment(10, 1, 2, b"."), now)
            .expect("accepted")
            .expect("message completes");
        let mut expected = round.to_vec();
        expected.push(b'.');
        assert_eq!(message.payload(), expected.as_slice());
    }
}

#[rstest]
fn stale_entries_expire_after_timeout(now: Instant) {
    let mut reassembler = Reassembler::new();
    reassembler
        .push_at(fragment(11, 0, 2, b"a"), now)
        .expect("accepted");

    assert!(
        reassembler
            .purge_expired_at(now + REASSEMBLY_TIMEOUT)
            .is_empty(),
        "an entry idle for exactly the timeout survives"
    );
    assert_eq!(
        reassembler.purge_expired_at(now + REASSEMBLY_TIMEOUT + Duration::from_millis(1)),
        vec![SequenceNumber::new(11)]
    );
    assert_eq!(reassembler.buffered_len(), 0);
}

#[rstest]
fn each_fragment_refreshes_last_seen(now: Instant) {
    let mut reassembler = Reassembler::new();
    let later = now + Duration::from_millis(800);

    reassembler
        .push_at(fragment(12, 0, 3, b"a"), now)
        .expect("accepted");
    reassembler
        .push_at(fragment(12, 1, 3, b"b"), later)
        .expect("accepted");

    assert!(
        reassembler
            .purge_expired_at(now + Duration::from_millis(1500))
            .is_empty()
    );
    assert_eq!(reassembler.buffered_len(), 1);
}

#[rstest]
fn expired_fragments_do_not_contribute_to_a_new_message(now: Instant) {
    let mut reassembler = Reassembler::new();
    reassembler
        .push_at(fragment(13, 0, 2, b"stale"), now)
        .expect("accepted");

    let later = now + Duration::from_secs(2);
    let result = reassembler
        .push_at(fragment(13, 1, 2, b"fresh"), later)
        .expect("accepted");

    assert!(result.is_none(), "fragment zero expired with its entry");
    assert_eq!(
        reassembler.pending(SequenceNumber::new(13)),
        Some(PendingStatus {
            received: 1,
            expected: 2,
            complete: false,
        })
    );
}

#[rstest]
fn entries_for_different_sequences_are_independent(now: Instant) {
    let mut reassembler = Reassembler::new();
    reassembler
        .push_at(fragment(20, 0, 2, b"A"), now)
        .expect("accepted");
    reassembler
        .push_at(fragment(21, 0, 2, b"B"), now)
        .expect("accepted");

    let second = reassembler
        .push_at(fragment(21, 1, 2, b"b"), now)
        .expect("accepted")
        .expect("sequence 21 completes");
    let first = reassembler
        .push_at(fragment(20, 1, 2, b"a"), now)
        .expect("accepted")
        .expect("sequence 20 completes");

    assert_eq!(second.payload(), b"Bb");
    assert_eq!(first.payload(), b"Aa");
}

#[rstest]
fn fragment_count_is_fixed_by_first_fragment(now: Instant) {
    let mut reassembler = Reassembler::new();
    reassembler
        .push_at(fragment(22, 0, 2, b"p"), now)
        .expect("accepted");

    // Claims to be the last of three, but the entry still expects two.
    let result = reassembler
        .push_at(fragment(22, 2, 3, b"r"), now)
        .expect("accepted");
    assert!(result.is_none(), "index 1 of the two expected is missing");

    let message = reassembler
        .push_at(fragment(22, 1, 2, b"q"), now)
        .expect("accepted")
        .expect("entry completes with its original count");
    assert_eq!(message.fragment_count(), 2);
    assert_eq!(message.payload(), b"pq");
}

#[rstest]
fn in_flight_limit_rejects_new_sequences(now: Instant) {
    let config =
        ReassemblyConfig::default().with_max_in_flight(NonZeroUsize::new(1).expect("non-zero"));
    let mut reassembler = Reassembler::with_config(config);
    reassembler
        .push_at(fragment(30, 0, 2, b"a"), now)
        .expect("first sequence accepted");

    let err = reassembler
        .push_at(fragment(31, 0, 2, b"b"), now)
        .expect_err("second sequence exceeds limit");
    assert!(matches!(err, ReassemblyError::TooManyInFlight { .. }));
    assert_eq!(reassembler.buffered_len(), 1);

    let message = reassembler
        .push_at(fragment(30, 1, 2, b"c"), now)
        .expect("existing sequence still accepted")
        .expect("message completes");
    assert_eq!(message.payload(), b"ac");
}

#[rstest]
fn message_size_limit_discards_entry(now: Instant) {
    let limit = NonZeroUsize::new(4).expect("non-zero");
    let config = ReassemblyConfig::default().with_max_message_size(limit);
    let mut reassembler = Reassembler::with_config(config);
    reassembler
        .push_at(fragment(40, 0, 2, b"abc"), now)
        .expect("within limit");

    let err = reassembler
        .push_at(fragment(40, 1, 2, b"de"), now)
        .expect_err("growth beyond limit rejected");
    assert_eq!(
        err,
        ReassemblyError::MessageTooLarge {
            sequence_number: SequenceNumber::new(40),
            attempted: 5,
            limit,
        }
    );
    assert_eq!(reassembler.buffered_len(), 0);
}

#[rstest]
fn undecodable_concatenation_is_reported_and_evicted(now: Instant) {
    let mut reassembler = Reassembler::new();
    let sequence_number = SequenceNumber::new(50);
    let bogus_header = Header::new(
        Magic::Fragmented,
        sequence_number,
        Some(FragmentInfo::new(0, 0, FragmentIndex::zero(), 2)),
        "CHANNEL".to_owned(),
        true,
    );
    let bogus_first = Datagram::new(
        bogus_header,
        Bytes::from_static(b"BAD!"),
        Bytes::from_static(b"x"),
    );
    let mut partial = PartialMessage::new(2, now);
    partial.record(FragmentIndex::zero(), bogus_first, now);
    reassembler.partials.insert(sequence_number, partial);

    let err = reassembler
        .push_at(fragment(50, 1, 2, b"y"), now)
        .expect_err("concatenation must fail to decode");
    assert_eq!(
        err,
        ReassemblyError::ReassembledDecode {
            sequence_number,
            source: DecodeError::InvalidMagic {
                magic: read_network_u32(*b"BAD!"),
            },
        }
    );
    assert_eq!(
        reassembler.pending(sequence_number).map(|s| s.complete),
        Some(true)
    );

    reassembler.purge_expired_at(now);
    assert_eq!(reassembler.buffered_len(), 0);
}

#[rstest]
fn unterminated_first_channel_absorbs_later_payload(now: Instant) {
    let mut first = encode_fragment(&FragmentSpec {
        sequence: 50,
        payload_size: 5,
        fragment_offset: 0,
        fragment_number: 0,
        total_fragments: 2,
        channel: "OPEN",
        payload: &[],
    });
    assert_eq!(first.pop(), Some(0), "drop the channel terminator");
    let first = decode(first).expect("unterminated channel decodes");
    assert!(!first.header().is_channel_terminated());

    let mut reassembler = Reassembler::new();
    reassembler.push_at(first, now).expect("accepted");
    let message = reassembler
        .push_at(fragment(50, 1, 2, b"ab\0cd"), now)
        .expect("accepted")
        .expect("every index present");

    // The rescanned name runs into the payload up to its first NUL.
    assert_eq!(message.channel_name(), "OPENab");
    assert!(message.header().is_channel_terminated());
    assert_eq!(message.payload(), b"cd");
}
