use imdraw_gl::gl::{Bindings, GlCall, ObjectKind, RecordingGl, ShaderStage};
use imdraw_gl::gui::{BackendFlags, FontAtlas, Io};
use imdraw_gl::{Backend, BackendConfig, BackendError, ConfigError};

fn io_with_atlas() -> Io {
    let mut io = Io::new();
    io.fonts = FontAtlas::new_rgba32(4, 2, vec![128; 32]);
    io
}

fn backend() -> Backend<RecordingGl> {
    Backend::new(RecordingGl::new(), BackendConfig::default())
}

#[test]
fn test_reinitialize_after_shutdown_repeats_the_same_calls() {
    let mut backend = backend();
    let mut io = io_with_atlas();

    backend.initialize(&mut io).unwrap();
    let first = backend.gl().take_calls();
    backend.shutdown(&mut io);
    assert_eq!(backend.gl().live_object_count(), 0);
    backend.gl().clear_calls();

    backend.initialize(&mut io).unwrap();
    let second = backend.gl().take_calls();
    assert_eq!(first, second);
    assert!(io.fonts.tex_id.is_some());
}

#[test]
fn test_initialize_uploads_font_atlas() {
    let mut backend = backend();
    let mut io = io_with_atlas();
    backend.initialize(&mut io).unwrap();

    assert!(backend.gl().calls().contains(&GlCall::TexImage2D {
        width: 4,
        height: 2,
        len: 32
    }));
    assert!(io.backend_flags.contains(BackendFlags::HAS_MOUSE_CURSORS));
    assert_eq!(backend.gl().bindings(), Bindings::default());
}

#[test]
fn test_shutdown_is_idempotent() {
    let mut backend = backend();
    let mut io = io_with_atlas();
    backend.initialize(&mut io).unwrap();

    backend.shutdown(&mut io);
    backend.gl().clear_calls();
    backend.shutdown(&mut io);

    assert!(backend.gl().calls().is_empty());
    assert!(!backend.is_initialized());
    assert_eq!(io.fonts.tex_id, None);
}

#[test]
fn test_shutdown_before_initialize_is_a_no_op() {
    let mut backend = backend();
    let mut io = Io::new();
    backend.shutdown(&mut io);
    assert!(backend.gl().calls().is_empty());
}

#[test]
fn test_double_initialize_creates_nothing() {
    let mut backend = backend();
    let mut io = io_with_atlas();
    backend.initialize(&mut io).unwrap();
    let live = backend.gl().live_object_count();
    backend.gl().clear_calls();

    let err = backend.initialize(&mut io).unwrap_err();
    assert!(matches!(err, BackendError::Config(ConfigError::AlreadyInitialized)));
    assert!(backend.gl().calls().is_empty());
    assert_eq!(backend.gl().live_object_count(), live);
}

#[test]
fn test_shader_compile_failure_leaves_nothing_behind() {
    let mut backend = backend();
    backend.gl().fail_shader_compile(ShaderStage::Fragment);
    let mut io = io_with_atlas();

    let err = backend.initialize(&mut io).unwrap_err();
    match err {
        BackendError::Config(ConfigError::ShaderCompile { stage, log }) => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(!log.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.gl().live_object_count(), 0);
    assert!(!backend.is_initialized());
    assert_eq!(io.fonts.tex_id, None);
}

#[test]
fn test_link_failure_is_reported() {
    let mut backend = backend();
    backend.gl().fail_link();
    let mut io = io_with_atlas();
    let err = backend.initialize(&mut io).unwrap_err();
    assert!(matches!(err, BackendError::Config(ConfigError::ProgramLink { .. })));
    assert_eq!(backend.gl().live_object_count(), 0);
}

#[test]
fn test_missing_uniform_is_reported() {
    let mut backend = backend();
    backend.gl().hide_name("ProjMtx");
    let mut io = io_with_atlas();
    let err = backend.initialize(&mut io).unwrap_err();
    assert!(matches!(err, BackendError::Config(ConfigError::MissingUniform("ProjMtx"))));
    assert_eq!(backend.gl().live_object_count(), 0);
}

#[test]
fn test_texture_creation_failure_rolls_back() {
    let mut backend = backend();
    backend.gl().fail_create(ObjectKind::Texture);
    let mut io = io_with_atlas();
    let err = backend.initialize(&mut io).unwrap_err();
    assert!(matches!(err, BackendError::Config(ConfigError::ResourceCreation { .. })));
    assert_eq!(backend.gl().live_object_count(), 0);

    backend.gl().clear_failures();
    backend.initialize(&mut io).unwrap();
    assert!(backend.is_initialized());
}

#[test]
fn test_bad_atlas_is_rejected_before_any_gl_call() {
    let mut backend = backend();
    let mut io = Io::new();
    io.fonts = FontAtlas::new_rgba32(4, 4, vec![0; 10]);
    let err = backend.initialize(&mut io).unwrap_err();
    assert!(matches!(err, BackendError::Config(ConfigError::InvalidFontAtlas { .. })));
    assert!(backend.gl().calls().is_empty());
}
