#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use proptest::prelude::*;
    use schedcrypt_core::cancel::CancellationToken;
    use schedcrypt_core::config::RunConfig;
    use schedcrypt_core::constants::{FRAME_LEN_PREFIX, IV_LEN};
    use schedcrypt_core::crypto::derive_key;
    use schedcrypt_core::headers::{decode_header, encode_header, FileHeader};
    use schedcrypt_core::stream::chunk_worker::{encrypt_chunk, ChunkFailure, Operation};
    use schedcrypt_core::stream::framing::{write_length_prefixed, FrameError};
    use schedcrypt_core::stream::{
        decrypt, decrypt_bytes, decrypt_file, default_output_path, encrypt, encrypt_bytes,
        encrypt_file, InputSource, Orchestrator, OutputSink, RunState,
    };
    use schedcrypt_core::types::StreamError;

    const PW: &[u8] = b"correct horse battery staple";
    const CS: usize = 64;
    const FAST_KDF: u32 = 1_000;

    fn config(algorithm: &str, workers: usize) -> RunConfig {
        RunConfig::builder()
            .algorithm(algorithm)
            .quantum(32)
            .chunk_size(CS)
            .workers(workers)
            .queue_capacity(4)
            .kdf_iterations(FAST_KDF)
            .build()
            .unwrap()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    }

    fn plaintext(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let dir = std::env::temp_dir().join(format!("schedcrypt-{tag}-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Hand-built encrypted file whose chunk `bad` carries unaligned ciphertext.
    fn file_with_broken_chunk(chunks: u32, bad: u32) -> Vec<u8> {
        let salt = [0x11u8; 16];
        let key = derive_key(PW, &salt, FAST_KDF).unwrap();
        let mut out = encode_header(&FileHeader::new(salt, chunks)).to_vec();
        for id in 0..chunks {
            let frame = if id == bad {
                vec![0u8; IV_LEN + 17]
            } else {
                encrypt_chunk(&key, format!("chunk {id}").as_bytes()).unwrap()
            };
            write_length_prefixed(&mut out, &frame).unwrap();
        }
        out
    }

    // # ✅ 1. Round trip across boundary lengths

    #[test]
    fn round_trip_boundary_lengths() {
        let cfg = config("FCFS", 3);
        for len in [1, CS - 1, CS, CS + 1, 5 * CS + 7] {
            let pt = plaintext(len);
            let ct = encrypt_bytes(&pt, PW, &cfg).unwrap();

            let header = decode_header(&ct).unwrap();
            assert_eq!(header.chunk_count as usize, len.div_ceil(CS), "len {len}");
            assert_eq!(decrypt_bytes(&ct, PW, &cfg).unwrap(), pt, "len {len}");
        }
    }

    #[test]
    fn empty_input_rejected() {
        let err = encrypt_bytes(&[], PW, &config("FCFS", 2)).unwrap_err();
        assert!(matches!(err, StreamError::EmptyInput));
    }

    #[test]
    fn ciphertext_size_matches_layout() {
        let pt = plaintext(5 * CS + 7);
        let ct = encrypt_bytes(&pt, PW, &config("SJF", 2)).unwrap();
        // 5 full chunks pad to CS + 16, the 7-byte tail pads to 16.
        let frames = 5 * (FRAME_LEN_PREFIX + IV_LEN + CS + 16) + (FRAME_LEN_PREFIX + IV_LEN + 16);
        assert_eq!(ct.len(), FileHeader::LEN + frames);
    }

    // # ✅ 2. Output invariance across algorithms and pool sizes

    #[test]
    fn plaintext_invariant_across_schedules() {
        let pt = plaintext(9 * CS + 13);
        for alg in ["FCFS", "SJF", "Round Robin"] {
            for workers in 1..=8 {
                let cfg = config(alg, workers);
                let ct = encrypt_bytes(&pt, PW, &cfg).unwrap();
                // Decrypt under a different schedule than the one used to encrypt.
                let other = config("Round Robin", 9 - workers);
                assert_eq!(decrypt_bytes(&ct, PW, &other).unwrap(), pt, "{alg} x {workers}");
            }
        }
    }

    // # ✅ 3. Wrong password

    #[test]
    fn wrong_password_fails_padding() {
        let cfg = config("FCFS", 4);
        let ct = encrypt_bytes(&plaintext(16 * CS), PW, &cfg).unwrap();

        // 16 chunks: the chance that none fails padding is about 256^-16.
        let err = decrypt_bytes(&ct, b"not the password", &cfg).unwrap_err();
        match &err {
            StreamError::WorkerTask { failed_chunk_ids, failures } => {
                assert!(!failed_chunk_ids.is_empty());
                assert!(failed_chunk_ids.windows(2).all(|w| w[0] < w[1]));
                assert_eq!(failed_chunk_ids.len(), failures.len());
            }
            other => panic!("expected WorkerTask, got {other:?}"),
        }
        assert!(err.is_padding_failure());
    }

    // # ✅ 4. Failure aggregation

    #[test]
    fn failed_chunk_aggregated_and_no_output_file() {
        init_tracing();
        let dir = scratch_dir("agg");
        let input = dir.join("broken.enc");
        let output = dir.join("broken.out");
        fs::write(&input, file_with_broken_chunk(5, 3)).unwrap();

        let err = decrypt_file(&input, Some(output.as_path()), PW, &config("SJF", 3)).unwrap_err();
        match err {
            StreamError::WorkerTask { failed_chunk_ids, failures } => {
                assert_eq!(failed_chunk_ids, vec![3]);
                assert!(matches!(failures[0], ChunkFailure::Cipher(_)));
            }
            other => panic!("expected WorkerTask, got {other:?}"),
        }
        assert!(!output.exists());
        let leftovers: Vec<_> = fs::read_dir(&dir).unwrap().collect();
        assert_eq!(leftovers.len(), 1, "only the input may remain");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn broken_chunk_in_memory_reports_failed_state() {
        let mut orch = Orchestrator::new(config("FCFS", 2));
        let err = orch
            .decrypt(file_with_broken_chunk(5, 3).into(), OutputSink::Memory, PW, None)
            .unwrap_err();
        assert!(matches!(err, StreamError::WorkerTask { .. }));
        assert_eq!(orch.state(), RunState::Failed);
        assert_eq!(
            orch.history(),
            &[
                RunState::Idle,
                RunState::Splitting,
                RunState::Scheduling,
                RunState::Dispatching,
                RunState::Collecting,
                RunState::Failed,
            ]
        );
    }

    // # ✅ 5. Structural errors abort before workers

    #[test]
    fn truncated_file_is_frame_error() {
        let cfg = config("FCFS", 2);
        let ct = encrypt_bytes(&plaintext(3 * CS), PW, &cfg).unwrap();

        let err = decrypt_bytes(&ct[..ct.len() - 5], PW, &cfg).unwrap_err();
        assert!(matches!(err, StreamError::FrameFormat(FrameError::Truncated { .. })));

        let err = decrypt_bytes(&ct[..10], PW, &cfg).unwrap_err();
        assert!(matches!(err, StreamError::FrameFormat(FrameError::Truncated { what: "file header", .. })));
    }

    #[test]
    fn trailing_garbage_is_frame_error() {
        let cfg = config("FCFS", 2);
        let mut ct = encrypt_bytes(&plaintext(CS), PW, &cfg).unwrap();
        ct.extend_from_slice(b"junk");
        let err = decrypt_bytes(&ct, PW, &cfg).unwrap_err();
        assert!(matches!(err, StreamError::FrameFormat(FrameError::TrailingBytes { extra: 4 })));
    }

    #[test]
    fn oversized_chunk_count_in_header_is_frame_error() {
        let cfg = config("FCFS", 2);
        let mut forged = vec![0u8; 16];
        forged.extend_from_slice(&u32::MAX.to_be_bytes());
        forged.extend_from_slice(&[0u8; 4]);

        let mut orch = Orchestrator::new(cfg);
        let err = orch
            .decrypt(InputSource::Memory(forged.clone()), OutputSink::Memory, PW, None)
            .unwrap_err();
        assert!(matches!(
            err,
            StreamError::FrameFormat(FrameError::Truncated { what: "frame body", have: 4, .. })
        ));
        assert_eq!(orch.history(), &[RunState::Idle, RunState::Splitting, RunState::Failed]);

        let err = decrypt_bytes(&forged, PW, &config("SJF", 4)).unwrap_err();
        assert!(matches!(err, StreamError::FrameFormat(_)));
    }

    #[test]
    fn scheduling_config_rejected_before_input_is_read() {
        let dir = scratch_dir("cfg");
        let missing = dir.join("does-not-exist.bin");

        let mut cfg = config("FCFS", 2);
        cfg.algorithm = "Lottery".into();
        let mut orch = Orchestrator::new(cfg);
        let err = orch
            .encrypt(InputSource::File(missing.clone()), OutputSink::Memory, PW, None)
            .unwrap_err();
        assert!(matches!(err, StreamError::UnknownAlgorithm(name) if name == "Lottery"));
        assert_eq!(orch.history(), &[RunState::Idle, RunState::Failed]);

        let mut cfg = config("Round Robin", 2);
        cfg.quantum = Some(0);
        let err = Orchestrator::new(cfg)
            .decrypt(InputSource::File(missing), OutputSink::Memory, PW, None)
            .unwrap_err();
        assert!(matches!(err, StreamError::MissingQuantum));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unknown_algorithm_and_missing_quantum() {
        let mut cfg = config("FCFS", 2);
        cfg.algorithm = "Lottery".into();
        assert!(matches!(
            encrypt_bytes(b"data", PW, &cfg).unwrap_err(),
            StreamError::UnknownAlgorithm(name) if name == "Lottery"
        ));

        let mut cfg = config("Round Robin", 2);
        cfg.quantum = None;
        assert!(matches!(encrypt_bytes(b"data", PW, &cfg).unwrap_err(), StreamError::MissingQuantum));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut cfg = config("FCFS", 2);
        cfg.workers = 0;
        assert!(matches!(encrypt_bytes(b"data", PW, &cfg).unwrap_err(), StreamError::Config(_)));
    }

    // # ✅ 6. Gantt, progress and state history

    #[test]
    fn gantt_progress_and_states() {
        init_tracing();
        let workers = 3;
        let cfg = config("SJF", workers);
        let mut seen = Vec::new();
        let mut on_progress = |p: f64| seen.push(p);

        let out = encrypt(
            plaintext(11 * CS + 1).into(),
            OutputSink::Memory,
            PW,
            &cfg,
            Some(&mut on_progress),
        )
        .unwrap();

        assert_eq!(out.chunk_count, 12);
        assert_eq!(out.gantt.len(), 12);
        let ids: HashSet<u32> = out.gantt.iter().map(|g| g.chunk_id).collect();
        assert_eq!(ids, (0..12).collect::<HashSet<u32>>());
        for g in &out.gantt {
            assert!(g.start_offset_seconds >= 0.0);
            assert!(g.start_offset_seconds < g.end_offset_seconds);
            assert!(g.worker_id < workers);
        }

        assert_eq!(seen.len(), 12);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert!((seen[11] - 1.0).abs() < 1e-12);

        assert_eq!(
            out.states,
            vec![
                RunState::Idle,
                RunState::Splitting,
                RunState::Scheduling,
                RunState::Dispatching,
                RunState::Collecting,
                RunState::Reassembling,
                RunState::Done,
            ]
        );
        assert_eq!(out.schedule.len(), 12);
        assert_eq!(out.counters.chunks_ok, 12);
        assert_eq!(out.counters.bytes_in, (11 * CS + 1) as u64);
        assert_eq!(out.summary.operation, Operation::Encrypt);
        assert_eq!(out.summary.output_size, out.bytes().unwrap().len() as u64);
    }

    // # ✅ 7. Files and cancellation

    #[test]
    fn file_round_trip_with_default_names() {
        let dir = scratch_dir("files");
        let input = dir.join("report.txt");
        let pt = plaintext(4 * CS + 3);
        fs::write(&input, &pt).unwrap();
        let cfg = config("Round Robin", 4);

        let enc = encrypt_file(&input, None, PW, &cfg).unwrap();
        let enc_path = enc.output.path().unwrap().to_path_buf();
        assert_eq!(enc_path, dir.join("report.txt.enc"));

        fs::remove_file(&input).unwrap();
        let dec = decrypt_file(&enc_path, None, PW, &cfg).unwrap();
        assert_eq!(dec.output.path().unwrap(), input.as_path());
        assert_eq!(fs::read(&input).unwrap(), pt);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn default_output_names() {
        let p = PathBuf::from("/data/a.bin");
        assert_eq!(default_output_path(&p, Operation::Encrypt), PathBuf::from("/data/a.bin.enc"));
        assert_eq!(
            default_output_path(&PathBuf::from("/data/a.bin.enc"), Operation::Decrypt),
            PathBuf::from("/data/a.bin")
        );
        assert_eq!(default_output_path(&p, Operation::Decrypt), PathBuf::from("/data/a.bin.dec"));
    }

    #[test]
    fn cancelled_run_writes_nothing() {
        let dir = scratch_dir("cancel");
        let output = dir.join("out.enc");
        let token = CancellationToken::new();
        token.cancel();

        let mut orch = Orchestrator::new(config("FCFS", 2)).with_cancellation(token);
        let err = orch
            .encrypt(
                InputSource::Memory(plaintext(8 * CS)),
                OutputSink::File(output.clone()),
                PW,
                None,
            )
            .unwrap_err();

        assert!(matches!(err, StreamError::Cancelled));
        assert_eq!(orch.state(), RunState::Failed);
        assert!(!output.exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn cancel_during_collection_discards_completed_chunks() {
        let dir = scratch_dir("cancel-mid");
        let output = dir.join("out.enc");
        let token = CancellationToken::new();
        let trigger = token.clone();

        let mut seen = 0usize;
        let mut on_progress = |_: f64| {
            seen += 1;
            if seen == 4 {
                trigger.cancel();
            }
        };

        let mut orch = Orchestrator::new(config("SJF", 2)).with_cancellation(token);
        let err = orch
            .encrypt(
                InputSource::Memory(plaintext(16 * CS)),
                OutputSink::File(output.clone()),
                PW,
                Some(&mut on_progress),
            )
            .unwrap_err();

        assert!(matches!(err, StreamError::Cancelled));
        assert_eq!(seen, 4);
        assert_eq!(orch.state(), RunState::Failed);
        assert_eq!(
            orch.history(),
            &[
                RunState::Idle,
                RunState::Splitting,
                RunState::Scheduling,
                RunState::Dispatching,
                RunState::Collecting,
                RunState::Failed,
            ]
        );
        assert!(!output.exists());
        assert!(!dir.join(".out.enc.part").exists());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn reader_input_source() {
        let cfg = config("FCFS", 2);
        let pt = plaintext(2 * CS + 9);
        let ct = encrypt(
            InputSource::Reader(Box::new(std::io::Cursor::new(pt.clone()))),
            OutputSink::Memory,
            PW,
            &cfg,
            None,
        )
        .unwrap()
        .into_bytes()
        .unwrap();
        let back = decrypt(ct.into(), OutputSink::Memory, PW, &cfg, None).unwrap();
        assert_eq!(back.bytes().unwrap(), &pt[..]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn prop_round_trip(
            data in proptest::collection::vec(any::<u8>(), 1..700),
            workers in 1usize..6,
            alg in prop_oneof![Just("FCFS"), Just("SJF"), Just("RR")],
        ) {
            let cfg = config(alg, workers);
            let ct = encrypt_bytes(&data, PW, &cfg).unwrap();
            prop_assert_eq!(decrypt_bytes(&ct, PW, &cfg).unwrap(), data);
        }
    }
}
