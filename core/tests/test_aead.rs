#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use bigcrack_core::crypto::{
        build_aad, decrypt_and_verify, encrypt_pdu, EncryptedPdu, VerifyError, MIC_LEN,
    };

    const GSK: [u8; 16] = [0x42; 16];
    const NONCE: [u8; 13] = [0x07; 13];

    fn sealed(header: u8, plaintext: &[u8]) -> Vec<u8> {
        encrypt_pdu(header, plaintext, &GSK, &NONCE).unwrap()
    }

    #[test]
    fn seal_then_open() {
        let pt = b"LC3 frame payload";
        let pdu = sealed(0x00, pt);
        assert_eq!(pdu.len(), 2 + pt.len() + MIC_LEN);
        assert_eq!(pdu[1] as usize, pt.len() + MIC_LEN);

        let out = decrypt_and_verify(&pdu, &GSK, &NONCE, 0).unwrap();
        assert_eq!(out, pt);
    }

    #[test]
    fn empty_payload_is_just_a_tag() {
        let pdu = sealed(0x00, &[]);
        assert_eq!(pdu.len(), 6);
        assert!(decrypt_and_verify(&pdu, &GSK, &NONCE, 0).unwrap().is_empty());
    }

    #[test]
    fn wrong_key_is_tag_mismatch() {
        let pdu = sealed(0x00, b"hello");
        let err = decrypt_and_verify(&pdu, &[0x43; 16], &NONCE, 0).unwrap_err();
        assert_eq!(err, VerifyError::TagMismatch);
    }

    #[test]
    fn wrong_nonce_is_tag_mismatch() {
        let pdu = sealed(0x00, b"hello");
        let mut nonce = NONCE;
        nonce[4] ^= 0x80;
        assert_eq!(decrypt_and_verify(&pdu, &GSK, &nonce, 0).unwrap_err(), VerifyError::TagMismatch);
    }

    #[test]
    fn any_payload_or_tag_bit_flip_fails() {
        let pdu = sealed(0x00, b"0123456789");
        for i in 2..pdu.len() {
            let mut bad = pdu.clone();
            bad[i] ^= 0x01;
            assert_eq!(
                decrypt_and_verify(&bad, &GSK, &NONCE, 0).unwrap_err(),
                VerifyError::TagMismatch,
                "flip at byte {}",
                i
            );
        }
    }

    #[test]
    fn cssn_and_cstf_are_not_authenticated() {
        let pdu = sealed(0x00, b"payload");
        for bit in [0x04u8, 0x08, 0x10, 0x20] {
            let mut hdr = pdu.clone();
            hdr[0] ^= bit;
            decrypt_and_verify(&hdr, &GSK, &NONCE, 0).unwrap();
        }
    }

    #[test]
    fn llid_and_rfu_bits_are_authenticated() {
        let pdu = sealed(0x00, b"payload");
        for bit in [0x01u8, 0x02, 0x40, 0x80] {
            let mut hdr = pdu.clone();
            hdr[0] ^= bit;
            assert_eq!(
                decrypt_and_verify(&hdr, &GSK, &NONCE, 0).unwrap_err(),
                VerifyError::TagMismatch
            );
        }
    }

    #[test]
    fn aad_masks_header() {
        assert_eq!(build_aad(0xFF), [0xC3]);
        assert_eq!(build_aad(0x3C), [0x00]);
    }

    #[test]
    fn hw_offset_skips_radio_octet() {
        let pdu = sealed(0x02, b"nordic");
        let mut shifted = pdu.clone();
        shifted.insert(2, 0xEE);

        let out = decrypt_and_verify(&shifted, &GSK, &NONCE, 1).unwrap();
        assert_eq!(out, b"nordic");

        let parsed = EncryptedPdu::parse(shifted, 1).unwrap();
        assert_eq!(parsed.ciphertext(), &pdu[2..pdu.len() - MIC_LEN]);
        assert_eq!(parsed.mic(), &pdu[pdu.len() - MIC_LEN..]);
        assert_eq!(parsed.plaintext_len(), 6);
    }

    #[test]
    fn hw_offset_above_one_rejected() {
        let pdu = sealed(0x00, b"x");
        assert!(matches!(
            EncryptedPdu::parse(pdu, 2),
            Err(VerifyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn short_pdu_rejected() {
        assert!(matches!(
            EncryptedPdu::parse(vec![0u8, 4, 1, 2, 3], 0),
            Err(VerifyError::Malformed(_))
        ));
    }

    #[test]
    fn length_octet_must_match_payload() {
        let mut pdu = sealed(0x00, b"abcdef");
        pdu[1] += 1;
        assert!(matches!(EncryptedPdu::parse(pdu, 0), Err(VerifyError::Malformed(_))));
    }

    #[test]
    fn length_octet_below_mic_rejected() {
        let pdu = vec![0u8, 3, 0, 0, 0, 0];
        assert!(matches!(EncryptedPdu::parse(pdu, 0), Err(VerifyError::Malformed(_))));
    }

    #[test]
    fn open_into_reuses_buffer() {
        let parsed = EncryptedPdu::parse(sealed(0x00, b"first"), 0).unwrap();
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(b"stale contents from a previous try");
        parsed.open_into(&GSK, &NONCE, &mut buf).unwrap();
        assert_eq!(buf, b"first");
    }

    #[test]
    fn oversized_plaintext_rejected() {
        let err = encrypt_pdu(0x00, &[0u8; 252], &GSK, &NONCE).unwrap_err();
        assert!(matches!(err, VerifyError::InvalidArgument(_)));
    }

    proptest! {
        #[test]
        fn prop_seal_open(pt in proptest::collection::vec(any::<u8>(), 0..=200), key in any::<[u8; 16]>()) {
            let pdu = encrypt_pdu(0x00, &pt, &key, &NONCE).unwrap();
            let out = decrypt_and_verify(&pdu, &key, &NONCE, 0).unwrap();
            prop_assert_eq!(out, pt);
        }
    }
}
