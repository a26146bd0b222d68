mod common;

use common::{codes, pack_codes};
use lingea_trd::trd::codec::packed::{unpack_symbols, PackedCharacterDecoder};
use lingea_trd::FormatVariant;
use proptest::prelude::*;

proptest! {
    #[test]
    fn packed_ascii_round_trips(text in "[a-z ]{0,48}") {
        let bytes = pack_codes(&codes(&text));
        let decoder = PackedCharacterDecoder::new(FormatVariant::Standard.tables());

        let decoded = decoder.decode(&bytes, true);
        prop_assert_eq!(&decoded.text, &text);
        prop_assert_eq!(decoded.consumed, bytes.len());
        prop_assert!(decoded.unresolved.is_empty());
    }

    #[test]
    fn unpacking_never_overruns(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let (symbols, consumed) = unpack_symbols(&bytes, true);
        prop_assert!(consumed <= bytes.len());
        prop_assert!(symbols.iter().all(|&s| s < 64 && s != 0));
    }

    #[test]
    fn arbitrary_records_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..96)) {
        for variant in [FormatVariant::Standard, FormatVariant::Small] {
            let _ = lingea_trd::RecordDecoder::for_variant(variant).decode(&bytes);
        }
    }
}

#[test]
fn all_zero_span_is_one_byte_empty_string() {
    let decoder = PackedCharacterDecoder::new(FormatVariant::Standard.tables());
    let decoded = decoder.decode(&[0; 6], true);
    assert_eq!((decoded.text.as_str(), decoded.consumed), ("", 1));
}
