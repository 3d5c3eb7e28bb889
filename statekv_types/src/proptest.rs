//! Property tests for the ordering guarantees of the key encodings.
//!
//! 1. Decoding an encoding yields the original value.
//! 2. Byte order of two encodings equals the order of the values they encode.
//! 3. The encoding of a composite's first component is a prefix of the composite's encoding.

use crate::types::{
    DbCompositeKey, DbInt, DbLong, DbShort, DbString, DbTenantAwareKey, Deser, Prefix, Ser,
};
use proptest::prelude::*;

fn arb_composite() -> impl Strategy<Value = DbCompositeKey<DbLong, DbString>> {
    (any::<i64>(), "[a-z]{0,6}")
        .prop_map(|(long, s)| DbCompositeKey::new(DbLong::from(long), DbString::from(s)))
}

proptest! {
    #[test]
    fn short_order(a in any::<i16>(), b in any::<i16>()) {
        let a_buf = DbShort::from(a).ser_solo().unwrap();
        let b_buf = DbShort::from(b).ser_solo().unwrap();
        prop_assert_eq!(a.cmp(&b), a_buf.cmp(&b_buf));
    }

    #[test]
    fn int_order(a in any::<i32>(), b in any::<i32>()) {
        let a_buf = DbInt::from(a).ser_solo().unwrap();
        let b_buf = DbInt::from(b).ser_solo().unwrap();
        prop_assert_eq!(a.cmp(&b), a_buf.cmp(&b_buf));
        prop_assert_eq!(a, DbInt::deser_solo(&a_buf).unwrap().value());
    }

    #[test]
    fn long_order(a in any::<i64>(), b in any::<i64>()) {
        let a_buf = DbLong::from(a).ser_solo().unwrap();
        let b_buf = DbLong::from(b).ser_solo().unwrap();
        prop_assert_eq!(a.cmp(&b), a_buf.cmp(&b_buf));
        prop_assert_eq!(b, DbLong::deser_solo(&b_buf).unwrap().value());
    }

    #[test]
    fn string_order(a in "[a-c]{0,4}", b in "[a-c]{0,4}") {
        let a = DbString::from(a.as_str());
        let b = DbString::from(b.as_str());
        prop_assert_eq!(a.cmp(&b), a.ser_solo().unwrap().cmp(&b.ser_solo().unwrap()));
    }

    #[test]
    fn composite_order(a in arb_composite(), b in arb_composite()) {
        let a_buf = a.ser_solo().unwrap();
        let b_buf = b.ser_solo().unwrap();
        prop_assert_eq!(a.cmp(&b), a_buf.cmp(&b_buf));
        prop_assert_eq!(&a, &DbCompositeKey::deser_solo(&a_buf).unwrap());
    }

    #[test]
    fn composite_prefix(key in arb_composite()) {
        let buf = key.ser_solo().unwrap();
        let first = key.first.ser_solo().unwrap();
        prop_assert!(buf.starts_with(&first));
    }

    #[test]
    fn tenant_prefix_groups_tenants(
        tenant in "[a-z]{1,4}",
        long in any::<i64>(),
        other_tenant in "[a-z]{1,4}",
        other_long in any::<i64>(),
    ) {
        let key = DbTenantAwareKey::<_, Prefix>::new(tenant.as_str(), DbLong::from(long));
        let other =
            DbTenantAwareKey::<_, Prefix>::new(other_tenant.as_str(), DbLong::from(other_long));
        let tenant_prefix = DbString::from(tenant.as_str()).ser_solo().unwrap();
        let buf = key.ser_solo().unwrap();
        let other_buf = other.ser_solo().unwrap();

        prop_assert!(buf.starts_with(&tenant_prefix));
        prop_assert_eq!(tenant == other_tenant, other_buf.starts_with(&tenant_prefix));
    }
}
