// gestao-client/tests/client_integration.rs
// 集成测试 - 启动真实 gestao-server

use chrono::NaiveDate;
use gestao_client::{
    ClientConfig, ClientError, DataAccess, EntryCreate, EntryKind, LocalStore, LocalStoreConfig,
    OvertimeBoard, RemoteStore, Store, StoreMode, VacationCreate,
};
use gestao_server::{Config, ServerState, build_app};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct RunningServer {
    base_url: String,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl RunningServer {
    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle.await.unwrap();
    }
}

async fn spawn_server(dir: &TempDir) -> RunningServer {
    let config = Config::with_overrides(dir.path(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    let app = build_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                rx.await.ok();
            })
            .await
            .unwrap();
    });

    RunningServer {
        base_url: format!("http://{addr}"),
        shutdown,
        handle,
    }
}

/// Address nobody listens on
async fn unused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn data_access(base_url: &str) -> DataAccess {
    let config = ClientConfig::new(base_url).with_timeout(5).with_probe_timeout_ms(1500);
    let remote = RemoteStore::new(&config).unwrap();
    let local = LocalStore::open_in_memory(&LocalStoreConfig::default()).unwrap();
    DataAccess::initialize(remote, local, config.probe_timeout()).await
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(name: &str, kind: EntryKind, hours: f64) -> EntryCreate {
    EntryCreate::new(name, "Projeto X", kind, ymd(2024, 6, 1), hours).unwrap()
}

#[tokio::test]
async fn test_board_against_running_server() {
    let dir = TempDir::new().unwrap();
    let server = spawn_server(&dir).await;

    let access = data_access(&server.base_url).await;
    assert_eq!(access.mode(), StoreMode::Remote);

    let mut board = OvertimeBoard::new(access);
    board.load().await.unwrap();
    board.add_entry(entry("Ana", EntryKind::Extra, 3.0)).await.unwrap();
    let desconto = board
        .add_entry(entry("Ana", EntryKind::Desconto, 1.0))
        .await
        .unwrap()
        .clone();

    // Desconto is stored negative and shows up first
    assert_eq!(desconto.id, 2);
    assert_eq!(desconto.hours, -1.0);
    assert_eq!(board.entries()[0].id, desconto.id);
    assert_eq!(board.total_hours(), 2.0);

    // Server holds the same list, nothing went to the local store
    let remote = board.store().remote().list_entries().await.unwrap();
    assert_eq!(remote.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 1]);
    assert!(board.store().local().load_entries().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_vacations_against_running_server() {
    let dir = TempDir::new().unwrap();
    let server = spawn_server(&dir).await;
    let access = data_access(&server.base_url).await;

    let created = access
        .create_vacation(VacationCreate::new("Ana", ymd(2024, 7, 1), ymd(2024, 7, 10), Some("praia")).unwrap())
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.notes, "praia");

    let removed = access.delete_vacation(created.id).await.unwrap();
    assert_eq!(removed.map(|v| v.name), Some("Ana".to_string()));
    assert!(access.list_vacations().await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_server_validation_is_surfaced() {
    let dir = TempDir::new().unwrap();
    let server = spawn_server(&dir).await;
    let access = data_access(&server.base_url).await;

    // Built by hand to skip the client-side range check
    let inverted = VacationCreate {
        name: "Ana".into(),
        start_date: ymd(2024, 7, 10),
        end_date: ymd(2024, 7, 1),
        notes: String::new(),
    };
    let err = access.create_vacation(inverted).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)), "got {err:?}");
    assert!(access.local().load_vacations().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_remote_delete_of_offline_record_hits_local_store() {
    let dir = TempDir::new().unwrap();
    let server = spawn_server(&dir).await;
    let access = data_access(&server.base_url).await;

    let offline = access.local().create_entry(entry("Bruno", EntryKind::Extra, 1.0)).await.unwrap();
    let removed = access.delete_entry(offline.id).await.unwrap();
    assert_eq!(removed.map(|e| e.id), Some(offline.id));
    assert!(access.delete_entry(offline.id).await.unwrap().is_none());

    server.stop().await;
}

#[tokio::test]
async fn test_server_going_away_mid_session() {
    let dir = TempDir::new().unwrap();
    let server = spawn_server(&dir).await;
    let access = data_access(&server.base_url).await;
    assert_eq!(access.mode(), StoreMode::Remote);

    access.create_entry(entry("Ana", EntryKind::Extra, 2.0)).await.unwrap();
    server.stop().await;

    let saved = access.create_entry(entry("Bruno", EntryKind::Extra, 1.0)).await.unwrap();
    let listed = access.list_entries().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);
    assert_eq!(access.mode(), StoreMode::Remote);
}

#[tokio::test]
async fn test_offline_session_uses_local_store() {
    let access = data_access(&unused_url().await).await;
    assert_eq!(access.mode(), StoreMode::Local);

    let mut board = OvertimeBoard::new(access);
    board.load().await.unwrap();
    assert!(board.entries().is_empty());

    let a = board.add_entry(entry("Ana", EntryKind::Extra, 3.0)).await.unwrap().id;
    let b = board.add_entry(entry("Ana", EntryKind::Extra, 3.0)).await.unwrap().id;
    assert_ne!(a, b);

    // Unknown id: nothing changes
    board.delete_entry(-1).await.unwrap();
    assert_eq!(board.entries().len(), 2);

    let mut reloaded = OvertimeBoard::new(board.store().local().clone());
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.entries().len(), 2);
    assert_eq!(reloaded.total_hours(), 6.0);
}

#[tokio::test]
async fn test_build_data_access_from_config() {
    let dir = TempDir::new().unwrap();
    let config = ClientConfig::new(unused_url().await)
        .with_probe_timeout_ms(500)
        .with_local_store(LocalStoreConfig::new(dir.path().join("local.redb")));

    let access = config.build_data_access().await.unwrap();
    assert!(!access.is_remote_available());
    access.create_entry(entry("Ana", EntryKind::Extra, 1.0)).await.unwrap();
    drop(access);

    let local = LocalStore::open(&config.local).unwrap();
    assert_eq!(local.load_entries().len(), 1);
}
