#[cfg(test)]
mod tests {
    use schedcrypt_core::constants::IV_LEN;
    use schedcrypt_core::crypto::{cbc_decrypt, cbc_encrypt, CryptoError, DerivedKey, PaddingError};
    use schedcrypt_core::stream::chunk_worker::{
        decrypt_chunk, encrypt_chunk, encrypt_chunk_with_iv, CbcChunkProcessor, ChunkFailure,
        ChunkProcessor, Operation,
    };
    use schedcrypt_core::stream::framing::decode_frame;

    fn key(seed: u8) -> DerivedKey {
        let bytes: Vec<u8> = (0..32u8).map(|i| i.wrapping_add(seed)).collect();
        DerivedKey::from_slice(&bytes).unwrap()
    }

    // # ✅ 1. Known answer

    #[test]
    fn matches_reference_aes256_cbc_pkcs7() {
        let iv = [0xA5u8; IV_LEN];
        let frame = encrypt_chunk_with_iv(&key(0), &iv, b"scheduled chunk!x").unwrap();

        assert_eq!(&frame[..IV_LEN], &iv);
        assert_eq!(
            hex::encode(&frame[IV_LEN..]),
            "91b20506912b9e6a011c94345b01ee8430cb05c6a53874315204650957ccd91c"
        );
        assert_eq!(decrypt_chunk(&key(0), &frame).unwrap(), b"scheduled chunk!x");
    }

    // # ✅ 2. Frame shape

    #[test]
    fn frame_is_iv_plus_aligned_ciphertext() {
        for len in [0usize, 1, 15, 16, 17, 1000] {
            let pt = vec![0x42u8; len];
            let frame = encrypt_chunk(&key(1), &pt).unwrap();
            let view = decode_frame(&frame).unwrap();
            assert_eq!(view.ciphertext.len() % 16, 0);
            assert_eq!(view.ciphertext.len(), (len / 16 + 1) * 16);
        }
    }

    #[test]
    fn fresh_iv_per_chunk() {
        let a = encrypt_chunk(&key(2), b"same plaintext").unwrap();
        let b = encrypt_chunk(&key(2), b"same plaintext").unwrap();
        assert_ne!(&a[..IV_LEN], &b[..IV_LEN]);
        assert_ne!(a, b);
    }

    // # ✅ 3. Failure kinds

    #[test]
    fn frame_shorter_than_iv_is_frame_error() {
        let err = decrypt_chunk(&key(3), &[0u8; 10]).unwrap_err();
        assert!(matches!(err, CryptoError::Frame(_)));
        assert!(matches!(ChunkFailure::from(err), ChunkFailure::FrameFormat(_)));
    }

    #[test]
    fn unaligned_ciphertext_is_cipher_error() {
        let err = decrypt_chunk(&key(3), &[0u8; IV_LEN + 17]).unwrap_err();
        assert!(matches!(err, CryptoError::CiphertextNotAligned { len: 17 }));
        assert!(matches!(ChunkFailure::from(err), ChunkFailure::Cipher(_)));
    }

    #[test]
    fn iv_only_frame_is_rejected() {
        let err = decrypt_chunk(&key(3), &[0u8; IV_LEN]).unwrap_err();
        assert!(matches!(err, CryptoError::EmptyCiphertext));
    }

    #[test]
    fn wrong_key_fails_padding_in_practice() {
        // A single block fails padding with probability about 255/256; across
        // 32 independent chunks at least one failure is effectively certain.
        let failures = (0..32)
            .map(|i| encrypt_chunk(&key(4), format!("chunk {i}").as_bytes()).unwrap())
            .filter(|frame| {
                matches!(
                    decrypt_chunk(&key(5), frame),
                    Err(CryptoError::Padding(_))
                )
            })
            .count();
        assert!(failures > 0);
    }

    #[test]
    fn padding_failure_maps_to_padding_kind() {
        let f = ChunkFailure::from(CryptoError::Padding(PaddingError::ZeroPad));
        assert_eq!(f, ChunkFailure::PaddingValidation(PaddingError::ZeroPad));
    }

    #[test]
    fn raw_cbc_rejects_unaligned_plaintext() {
        let err = cbc_encrypt(&key(6), &[0u8; 16], &[1u8; 15]).unwrap_err();
        assert!(matches!(err, CryptoError::CiphertextNotAligned { len: 15 }));
        let err = cbc_decrypt(&key(6), &[0u8; 8], &[1u8; 16]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidIvLen { expected: 16, actual: 8 }));
    }

    // # ✅ 4. Processor

    #[test]
    fn processor_round_trips() {
        let enc = CbcChunkProcessor::new(key(7), Operation::Encrypt);
        let dec = CbcChunkProcessor::new(key(7), Operation::Decrypt);
        assert_eq!(enc.operation(), Operation::Encrypt);

        let frame = enc.process(0, b"payload").unwrap();
        assert_eq!(dec.process(0, &frame).unwrap(), b"payload");
    }
}
