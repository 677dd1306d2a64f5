//! In-process stand-in for the external store, served over a real socket so
//! tests exercise the reqwest client end to end. Mimics the json-server
//! query/merge behavior the real store exposes.

use crate::model::time_record::{NewTimeRecord, TimeRecord, TimeRecordPatch};
use crate::model::user::User;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockStore {
    users: Arc<Mutex<Vec<User>>>,
    records: Arc<Mutex<Vec<TimeRecord>>>,
    next_id: Arc<AtomicU64>,
    user_lookups: Arc<AtomicUsize>,
}

impl MockStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.next_id.store(1, Ordering::SeqCst);
        store
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn seed_record(&self, record: TimeRecord) {
        let id = record.id;
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
        self.records.lock().unwrap().push(record);
    }

    pub fn records(&self) -> Vec<TimeRecord> {
        self.records.lock().unwrap().clone()
    }

    /// How many times `GET /users` was hit. Lockout tests assert that a
    /// locked login never reaches the store.
    pub fn user_lookups(&self) -> usize {
        self.user_lookups.load(Ordering::SeqCst)
    }

    /// Bind to an ephemeral port and serve until the test ends. Returns the
    /// base url for `StoreClient`.
    pub fn serve(&self) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let state = self.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .route("/users", web::get().to(get_users))
                .route("/timeRecords", web::get().to(list_records))
                .route("/timeRecords", web::post().to(create_record))
                .route("/timeRecords/{id}", web::get().to(get_record))
                .route("/timeRecords/{id}", web::patch().to(patch_record))
        })
        .listen(listener)
        .unwrap()
        .workers(1)
        .run();
        actix_web::rt::spawn(server);

        format!("http://{}", addr)
    }
}

async fn get_users(
    state: web::Data<MockStore>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    state.user_lookups.fetch_add(1, Ordering::SeqCst);

    let users: Vec<User> = state
        .users
        .lock()
        .unwrap()
        .iter()
        .filter(|u| query.get("email").is_none_or(|e| &u.email == e))
        .filter(|u| query.get("password").is_none_or(|p| &u.password == p))
        .cloned()
        .collect();

    HttpResponse::Ok().json(users)
}

async fn list_records(
    state: web::Data<MockStore>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let records: Vec<TimeRecord> = state
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|r| {
            query
                .get("employeeId")
                .is_none_or(|id| r.employee_id.to_string() == *id)
        })
        .cloned()
        .collect();

    HttpResponse::Ok().json(records)
}

async fn get_record(state: web::Data<MockStore>, path: web::Path<u64>) -> impl Responder {
    let id = path.into_inner();
    let records = state.records.lock().unwrap();
    match records.iter().find(|r| r.id == id) {
        Some(record) => HttpResponse::Ok().json(record),
        None => HttpResponse::NotFound().json(serde_json::json!({})),
    }
}

async fn create_record(
    state: web::Data<MockStore>,
    body: web::Json<NewTimeRecord>,
) -> impl Responder {
    let body = body.into_inner();
    let record = TimeRecord {
        id: state.next_id.fetch_add(1, Ordering::SeqCst),
        employee_id: body.employee_id,
        date: body.date,
        time_ins: body.time_ins,
        total_work_hours: body.total_work_hours,
        status: body.status,
    };
    state.records.lock().unwrap().push(record.clone());
    HttpResponse::Created().json(record)
}

async fn patch_record(
    state: web::Data<MockStore>,
    path: web::Path<u64>,
    body: web::Json<TimeRecordPatch>,
) -> impl Responder {
    let id = path.into_inner();
    let mut records = state.records.lock().unwrap();
    match records.iter_mut().find(|r| r.id == id) {
        Some(record) => {
            let patch = body.into_inner();
            record.time_ins = patch.time_ins;
            record.total_work_hours = patch.total_work_hours;
            record.status = patch.status;
            HttpResponse::Ok().json(record.clone())
        }
        None => HttpResponse::NotFound().json(serde_json::json!({})),
    }
}
