mod tests {
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    use myrtio_zone_light::sink::{PrivilegedWriter, ZoneFile};
    use myrtio_zone_light::{ColorSink, Rgb, SinkError};
    use rstest::rstest;

    fn zone_in(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("zone00");
        fs::write(&path, "").unwrap();
        path
    }

    #[rstest]
    #[case(io::ErrorKind::PermissionDenied)]
    #[case(io::ErrorKind::NotFound)]
    #[case(io::ErrorKind::Other)]
    fn test_io_error_classification(#[case] kind: io::ErrorKind) {
        let path = PathBuf::from("/sys/zone00");
        let err = SinkError::from_io(io::Error::from(kind), path.clone());
        match (kind, err) {
            (io::ErrorKind::PermissionDenied, SinkError::PermissionDenied(p))
            | (io::ErrorKind::NotFound, SinkError::DeviceMissing(p)) => assert_eq!(p, path),
            (io::ErrorKind::Other, SinkError::Io(inner)) => assert_eq!(inner.kind(), kind),
            (kind, err) => panic!("{kind:?} classified as {err:?}"),
        }
    }

    #[test]
    fn test_zone_file_writes_hex() {
        let dir = tempfile::tempdir().unwrap();
        let path = zone_in(&dir);
        let mut sink = ZoneFile::new(&path);

        sink.write(Rgb::new(0xab, 0x00, 0x0f)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ab000f");
    }

    #[test]
    fn test_zone_file_missing_device() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zone00");
        let mut sink = ZoneFile::new(&path);

        match sink.write(Rgb::new(1, 2, 3)) {
            Err(SinkError::DeviceMissing(p)) => assert_eq!(p, path),
            other => panic!("expected DeviceMissing, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_privileged_writer_without_helper_runs_tee() {
        let dir = tempfile::tempdir().unwrap();
        let path = zone_in(&dir);
        let mut sink = PrivilegedWriter::new(Vec::<String>::new(), &path);

        sink.write(Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "010203");
    }

    #[test]
    fn test_privileged_writer_helper_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = zone_in(&dir);
        let mut sink = PrivilegedWriter::new(["false"], &path);

        let err = sink.write(Rgb::new(1, 2, 3)).unwrap_err();
        assert!(matches!(err, SinkError::HelperFailed(status) if !status.success()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_privileged_writer_missing_helper() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PrivilegedWriter::new(["myrtio-no-such-helper"], zone_in(&dir));

        let err = sink.write(Rgb::new(1, 2, 3)).unwrap_err();
        assert!(matches!(err, SinkError::Io(ref inner) if inner.kind() == io::ErrorKind::NotFound));
    }
}
