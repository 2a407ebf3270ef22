#[cfg(test)]
mod tests {
    use crate::{
        ambient::AmbientZoneGuard,
        scenario::{ColumnSetup, persist_flush_refresh},
    };
    use chrono::{DateTime, Local, Offset, TimeZone, Utc};
    use codec::{CodecError, OffsetTimestampCodec, TimestampPolicy};
    use connectors::{
        error::StoreError,
        store::{RowStore, memory::MemoryStore, sled_store::SledStore},
    };
    use model::core::{
        capability::ColumnCapability, data_type::SqlDialect, timestamp::OffsetTimestamp,
        zone::SessionZone,
    };
    use std::sync::Arc;
    use tempfile::tempdir;
    use tracing_test::traced_test;

    const AMBIENT_ZONES: [&str; 3] = ["UTC", "Europe/Vienna", "America/New_York"];

    fn epoch_in_new_york() -> OffsetTimestamp {
        OffsetTimestamp::new(DateTime::<Utc>::UNIX_EPOCH, -5 * 60)
    }

    fn zone(name: &str) -> SessionZone {
        name.parse().unwrap()
    }

    fn datetimeoffset_column() -> ColumnSetup<'static> {
        ColumnSetup {
            dialect: SqlDialect::MsSql,
            column_type: "DATETIMEOFFSET",
            session_zone: SessionZone::utc(),
            policy: TimestampPolicy::OffsetPreserving,
        }
    }

    fn ambient_offset_at_epoch() -> i32 {
        Local
            .offset_from_utc_datetime(&DateTime::<Utc>::UNIX_EPOCH.naive_utc())
            .fix()
            .local_minus_utc()
    }

    async fn round_trip_under(ambient: &str, setup: ColumnSetup<'_>) -> OffsetTimestamp {
        let _ambient = AmbientZoneGuard::enter(ambient).await;
        if ambient == "Europe/Vienna" {
            assert_eq!(ambient_offset_at_epoch(), 3600, "TZ was not applied");
        }
        let store: Arc<dyn RowStore> = Arc::new(MemoryStore::new());
        persist_flush_refresh(store, setup, 0, epoch_in_new_york())
            .await
            .expect("round trip")
            .created_at
    }

    #[traced_test]
    #[tokio::test]
    async fn should_preserve_instant_in_non_utc_system_time_zone() {
        let reloaded = round_trip_under("Europe/Vienna", datetimeoffset_column()).await;
        assert_eq!(
            reloaded.instant(),
            epoch_in_new_york().instant(),
            "Persisted time should be the same instant as the original"
        );
    }

    #[traced_test]
    #[tokio::test]
    async fn should_preserve_offset_in_non_utc_system_time_zone() {
        let reloaded = round_trip_under("Europe/Vienna", datetimeoffset_column()).await;
        assert_eq!(
            reloaded.utc_offset_minutes(),
            epoch_in_new_york().utc_offset_minutes(),
            "Persisted time should preserve original offset"
        );
    }

    #[traced_test]
    #[tokio::test]
    async fn should_preserve_instant_in_utc_system_time_zone() {
        let reloaded = round_trip_under("UTC", datetimeoffset_column()).await;
        assert_eq!(reloaded.instant(), epoch_in_new_york().instant());
    }

    #[traced_test]
    #[tokio::test]
    async fn should_preserve_offset_in_utc_system_time_zone() {
        let reloaded = round_trip_under("UTC", datetimeoffset_column()).await;
        assert_eq!(
            reloaded.utc_offset_minutes(),
            epoch_in_new_york().utc_offset_minutes()
        );
    }

    #[traced_test]
    #[tokio::test]
    async fn cet_epoch_round_trips_exactly_in_every_ambient_zone() {
        let cet = OffsetTimestamp::new(DateTime::<Utc>::UNIX_EPOCH, 60);
        for ambient in AMBIENT_ZONES {
            let _ambient = AmbientZoneGuard::enter(ambient).await;
            let store: Arc<dyn RowStore> = Arc::new(MemoryStore::new());
            let reloaded = persist_flush_refresh(store, datetimeoffset_column(), 1, cet)
                .await
                .unwrap();
            assert_eq!(reloaded.created_at, cet, "ambient zone {ambient}");
        }
    }

    #[traced_test]
    #[tokio::test]
    async fn ambient_zone_does_not_change_any_outcome() {
        let setups = [
            datetimeoffset_column(),
            ColumnSetup {
                dialect: SqlDialect::MsSql,
                column_type: "DATETIME2",
                session_zone: zone("Europe/Vienna"),
                policy: TimestampPolicy::InstantPreserving,
            },
            ColumnSetup {
                dialect: SqlDialect::Postgres,
                column_type: "TIMESTAMPTZ",
                session_zone: zone("America/New_York"),
                policy: TimestampPolicy::InstantPreserving,
            },
            ColumnSetup {
                dialect: SqlDialect::MySql,
                column_type: "DATETIME",
                session_zone: zone("+01:00"),
                policy: TimestampPolicy::InstantPreserving,
            },
        ];

        for setup in setups {
            let mut outcomes = Vec::new();
            for ambient in AMBIENT_ZONES {
                outcomes.push(round_trip_under(ambient, setup).await);
            }
            assert!(
                outcomes.windows(2).all(|pair| pair[0] == pair[1]),
                "{} gave {outcomes:?}",
                setup.column_type
            );
            assert_eq!(outcomes[0].instant(), DateTime::<Utc>::UNIX_EPOCH);
        }
    }

    #[traced_test]
    #[tokio::test]
    async fn naive_column_reports_session_offset_not_ambient_offset() {
        let setup = ColumnSetup {
            dialect: SqlDialect::MsSql,
            column_type: "DATETIME2",
            session_zone: zone("Europe/Vienna"),
            policy: TimestampPolicy::InstantPreserving,
        };
        for ambient in AMBIENT_ZONES {
            let reloaded = round_trip_under(ambient, setup).await;
            assert_eq!(reloaded.instant(), DateTime::<Utc>::UNIX_EPOCH);
            assert_eq!(reloaded.utc_offset_minutes(), 60, "ambient zone {ambient}");
        }
    }

    #[traced_test]
    #[tokio::test]
    async fn offset_preserving_refuses_naive_column() {
        let _ambient = AmbientZoneGuard::enter("Europe/Vienna").await;
        let setup = ColumnSetup {
            dialect: SqlDialect::MsSql,
            column_type: "DATETIME2",
            session_zone: zone("Europe/Vienna"),
            policy: TimestampPolicy::OffsetPreserving,
        };
        let store: Arc<dyn RowStore> = Arc::new(MemoryStore::new());
        let err = persist_flush_refresh(store, setup, 0, epoch_in_new_york())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Codec(CodecError::UnsupportedColumnCapability { .. })
        ));
    }

    #[traced_test]
    #[tokio::test]
    async fn sled_store_matches_memory_store() {
        let dir = tempdir().unwrap();
        let _ambient = AmbientZoneGuard::enter("Europe/Vienna").await;
        let values = [
            epoch_in_new_york(),
            OffsetTimestamp::new(Utc.with_ymd_and_hms(2019, 3, 31, 0, 59, 59).unwrap(), 14 * 60),
            OffsetTimestamp::new(Utc.timestamp_nanos(1_234_567_890_123_456_789), -18 * 60),
        ];
        let setups = [
            datetimeoffset_column(),
            ColumnSetup {
                dialect: SqlDialect::Postgres,
                column_type: "TIMESTAMPTZ",
                session_zone: zone("Europe/Vienna"),
                policy: TimestampPolicy::InstantPreserving,
            },
        ];

        let sled: Arc<dyn RowStore> = Arc::new(SledStore::open(dir.path()).unwrap());
        let memory: Arc<dyn RowStore> = Arc::new(MemoryStore::new());
        let mut id = 0;
        for setup in setups {
            for value in values {
                let from_sled = persist_flush_refresh(sled.clone(), setup, id, value)
                    .await
                    .unwrap();
                let from_memory = persist_flush_refresh(memory.clone(), setup, id, value)
                    .await
                    .unwrap();
                assert_eq!(from_sled, from_memory, "{} value {value}", setup.column_type);
                assert_eq!(from_sled.created_at.instant(), value.instant());
                id += 1;
            }
        }
        assert!(logs_contain("read back 1969-12-31T19:00:00-05:00"));
    }

    #[test]
    fn encode_decode_idempotent_under_every_ambient_zone() {
        let codec = OffsetTimestampCodec::new(TimestampPolicy::InstantPreserving);
        let column = ColumnCapability::WallClock(zone("Europe/Vienna"));
        let mut records = Vec::new();
        for ambient in AMBIENT_ZONES {
            let _ambient = AmbientZoneGuard::set(ambient);
            let first = codec.encode(&epoch_in_new_york(), &column).unwrap();
            let again = codec
                .encode(&codec.decode(&first).unwrap(), &column)
                .unwrap();
            assert_eq!(again, first);
            records.push(first);
        }
        assert!(records.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
