// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CUPS client: the service operations.
//
// Every call is Build -> Send -> Parse -> Project.  Nothing is cached between
// calls; the only shared state is the request-id counter.
//
//   - CUPS-Get-Printers        (CUPS IPP extension, 0x4002)
//   - CUPS-Get-Default         (CUPS IPP extension, 0x4001)
//   - Get-Printer-Attributes   (RFC 8011 §4.2.5)
//   - Get-Jobs                 (RFC 8011 §4.2.6)
//   - Get-Job-Attributes       (RFC 8011 §4.3.4)
//   - Print-Job / Create-Job   (RFC 8011 §4.2.1, §4.2.4)
//   - Cancel-Job               (RFC 8011 §4.3.3)

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, error, info, instrument, warn};

use inkwire_core::config::ServerConfig;
use inkwire_core::error::{BuildError, InkwireError, Result};
use inkwire_core::types::{Operation, StatusCode, WhichJobs};

use crate::attribute::Attribute;
use crate::job::JobBuilder;
use crate::request::{JOB_URI, PRINTER_URI, RequestBuilder};
use crate::resource::{PrintJob, Printer};
use crate::response::IppResponse;
use crate::transport::{HttpTransport, RequestOptions, Transport};
use crate::value::Value;

/// Job attributes requested when the caller does not name any.
pub const DEFAULT_JOB_ATTRIBUTES: &[&str] = &[
    "job-id",
    "job-uri",
    "job-name",
    "job-state",
    "job-state-reasons",
    "job-printer-uri",
    "job-printer-state-message",
    "date-time-at-creation",
    "time-at-creation",
    "number-of-documents",
];

const REQUESTING_USER_NAME: &str = "requesting-user-name";
const REQUESTED_ATTRIBUTES: &str = "requested-attributes";

/// Largest request id RFC 8010 §3.1.1 allows; ids run 1..=2^31-1.
const MAX_REQUEST_ID: u32 = 0x7FFF_FFFF;

/// Per-call settings for a service operation: attribute selection,
/// extension attributes and transport options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeQuery {
    /// `requested-attributes`.  When `None`, job lookups send
    /// [`DEFAULT_JOB_ATTRIBUTES`] and every other call sends nothing, which
    /// leaves the choice to the server.
    pub requested_attributes: Option<Vec<String>>,
    /// Extra operation attributes, merged last.  They replace any default
    /// attribute with the same name.
    pub extra: Vec<Attribute>,
    /// Transport options for this call; `None` uses the client's.
    pub options: Option<RequestOptions>,
}

impl AttributeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requested_attributes = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn extra(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.push(Attribute::new(name, value));
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = Some(options);
        self
    }

    fn requested_values(&self, default: &[&str]) -> Vec<Value> {
        match &self.requested_attributes {
            Some(names) => names.iter().map(|n| Value::keyword(n.as_str())).collect(),
            None => default.iter().map(|n| Value::keyword(*n)).collect(),
        }
    }

    /// Add `requested-attributes` (when there are any) and then the extras.
    fn apply(&self, request: RequestBuilder, default_requested: &[&str]) -> RequestBuilder {
        let requested = self.requested_values(default_requested);
        let request = if requested.is_empty() {
            request
        } else {
            request.add_operation_attributes(Attribute::multi(REQUESTED_ATTRIBUTES, requested))
        };
        request.add_operation_attributes(self.extra.iter().cloned())
    }
}

/// Filter for Get-Jobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobQuery {
    pub which_jobs: WhichJobs,
    pub attributes: AttributeQuery,
}

impl JobQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn which(mut self, which_jobs: WhichJobs) -> Self {
        self.which_jobs = which_jobs;
        self
    }

    pub fn requested<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = self.attributes.requested(names);
        self
    }

    pub fn extra(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes = self.attributes.extra(name, value);
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.attributes = self.attributes.options(options);
        self
    }
}

/// Client for a CUPS (or any IPP) server.
#[derive(Debug)]
pub struct CupsClient<T: Transport = HttpTransport> {
    transport: T,
    config: ServerConfig,
    options: RequestOptions,
    next_request_id: AtomicU32,
}

impl CupsClient<HttpTransport> {
    /// A client speaking HTTP(S) to the server in `config`.
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> CupsClient<T> {
    pub fn new(config: ServerConfig, transport: T) -> Self {
        Self {
            transport,
            config,
            options: RequestOptions::default(),
            next_request_id: AtomicU32::new(1),
        }
    }

    /// Transport options used by every call that does not bring its own.
    pub fn with_request_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A fresh request for `operation` with this client's version and the
    /// next request id.
    pub fn request(&self, operation: Operation) -> RequestBuilder {
        RequestBuilder::new()
            .set_version(self.config.ipp_version)
            .set_operation(operation)
            .set_request_id(self.next_request_id())
    }

    /// Ids wrap back to 1 after `MAX_REQUEST_ID`; 0 is never issued.
    fn next_request_id(&self) -> u32 {
        loop {
            let id = self.next_request_id.fetch_add(1, Ordering::Relaxed) & MAX_REQUEST_ID;
            if id != 0 {
                return id;
            }
        }
    }

    /// Every printer the server knows about.
    #[instrument(skip(self, query), fields(host = %self.config.host))]
    pub async fn list_printers(&self, query: &AttributeQuery) -> Result<Vec<Printer>> {
        let request = query.apply(self.request(Operation::CupsGetPrinters), &[]);
        let printers = self.send_query(request, query).await?.into_printers();
        debug!(count = printers.len(), "listed printers");
        Ok(printers)
    }

    /// The server's default destination, if one is configured.
    #[instrument(skip(self, query), fields(host = %self.config.host))]
    pub async fn default_printer(&self, query: &AttributeQuery) -> Result<Option<Printer>> {
        let request = query.apply(self.request(Operation::CupsGetDefault), &[]);
        not_found_as_none(self.send_query(request, query).await.map(|r| r.printer()))
    }

    /// One printer by URI.  `None` if the server has no such printer.
    #[instrument(skip(self, query))]
    pub async fn get_printer(&self, uri: &str, query: &AttributeQuery) -> Result<Option<Printer>> {
        let request = self
            .request(Operation::GetPrinterAttributes)
            .operation_attribute(PRINTER_URI, Value::uri(uri));
        let request = query.apply(request, &[]);
        not_found_as_none(self.send_query(request, query).await.map(|r| r.printer()))
    }

    /// Jobs queued on a printer, `not-completed` ones unless the query says
    /// otherwise.
    #[instrument(skip(self, query), fields(which = query.which_jobs.keyword()))]
    pub async fn list_jobs(&self, printer_uri: &str, query: &JobQuery) -> Result<Vec<PrintJob>> {
        let request = self
            .request(Operation::GetJobs)
            .operation_attribute(PRINTER_URI, Value::uri(printer_uri))
            .operation_attribute("which-jobs", Value::keyword(query.which_jobs.keyword()));
        let request = query.attributes.apply(request, DEFAULT_JOB_ATTRIBUTES);

        let jobs = self.send_query(request, &query.attributes).await?.into_jobs();
        debug!(count = jobs.len(), "listed jobs");
        Ok(jobs)
    }

    /// One job by URI.  `None` if the server has no such job.
    #[instrument(skip(self, query))]
    pub async fn get_job(&self, job_uri: &str, query: &AttributeQuery) -> Result<Option<PrintJob>> {
        let request = self
            .request(Operation::GetJobAttributes)
            .operation_attribute(JOB_URI, Value::uri(job_uri));
        let request = query.apply(request, DEFAULT_JOB_ATTRIBUTES);
        not_found_as_none(self.send_query(request, query).await.map(|r| r.job()))
    }

    /// Submit a job: Print-Job when it carries content, Create-Job otherwise.
    /// Returns the job as described in the server's response.  Extras in
    /// `query` replace job attributes of the same name in the operation group.
    #[instrument(skip(self, job, query), fields(printer = job.printer_uri().unwrap_or("-"), operation = %job.operation()))]
    pub async fn create_job(&self, job: &JobBuilder, query: &AttributeQuery) -> Result<Option<PrintJob>> {
        let mut request = job.to_request()?;
        if job.explicit_version().is_none() {
            request = request.set_version(self.config.ipp_version);
        }
        if job.explicit_request_id().is_none() {
            request = request.set_request_id(self.next_request_id());
        }

        let request = query.apply(request, &[]);

        let created = self.send_query(request, query).await?.job();
        match &created {
            Some(j) => info!(job_id = j.id(), job_uri = j.uri(), "job created"),
            None => warn!("server accepted the job but returned no job attributes"),
        }
        Ok(created)
    }

    #[instrument(skip(self, query))]
    pub async fn cancel_job(&self, job_uri: &str, query: &AttributeQuery) -> Result<()> {
        let request = self
            .request(Operation::CancelJob)
            .operation_attribute(JOB_URI, Value::uri(job_uri));
        let request = query.apply(request, &[]);
        self.send_query(request, query).await?;
        info!("job cancelled");
        Ok(())
    }

    /// Send any request with this client's transport options.
    ///
    /// Adds the configured `requesting-user-name` when the request has none.
    /// A response with a non-successful status is returned as
    /// [`InkwireError::ServerStatus`].
    pub async fn submit(&self, request: RequestBuilder) -> Result<IppResponse> {
        self.submit_with(request, &self.options).await
    }

    async fn send_query(&self, request: RequestBuilder, query: &AttributeQuery) -> Result<IppResponse> {
        self.submit_with(request, query.options.as_ref().unwrap_or(&self.options)).await
    }

    pub async fn submit_with(&self, request: RequestBuilder, options: &RequestOptions) -> Result<IppResponse> {
        let operation = request.operation().ok_or(BuildError::MissingOperation)?;
        let request = self.with_requesting_user(request);
        let request_id = request.request_id();
        let bytes = request.encode()?;
        debug!(%operation, request_id, bytes = bytes.len(), path = %options.path, "sending IPP request");

        let reply = self.transport.send(bytes, options).await.map_err(|source| {
            error!(%operation, error = %source, "IPP transport failed");
            InkwireError::TransportFailed { operation, source }
        })?;

        let response = IppResponse::parse(&reply)?;
        if response.request_id != request_id {
            warn!(%operation, sent = request_id, received = response.request_id, "request-id mismatch");
        }
        if !response.is_success() {
            let message = response.status_message().map(str::to_owned);
            warn!(%operation, status = %response.status, message = message.as_deref(), "IPP request rejected");
            return Err(InkwireError::ServerStatus {
                operation,
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    fn with_requesting_user(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.requesting_user_name {
            Some(user) if !request.operation_attributes().contains(REQUESTING_USER_NAME) => {
                request.operation_attribute(REQUESTING_USER_NAME, Value::ascii_name(user))
            }
            _ => request,
        }
    }
}

fn not_found_as_none<R>(result: Result<Option<R>>) -> Result<Option<R>> {
    match result {
        Err(e) if e.status() == Some(StatusCode::CLIENT_ERROR_NOT_FOUND) => Ok(None),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;
    use std::time::Duration;

    use inkwire_core::error::TransportError;
    use inkwire_core::types::{IppVersion, JobState, PrinterState};

    use super::*;
    use crate::attribute::AttributeGroup;
    use crate::tag::GroupTag;
    use crate::wire::{Frame, decode_frame};

    /// Replays canned replies and records every request.
    #[derive(Debug, Default)]
    struct MockTransport {
        replies: Mutex<VecDeque<std::result::Result<Vec<u8>, TransportError>>>,
        sent: Mutex<Vec<(Vec<u8>, RequestOptions)>>,
    }

    impl MockTransport {
        fn replying(replies: impl IntoIterator<Item = Vec<u8>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().map(Ok).collect()),
                ..Self::default()
            }
        }

        fn failing(error: TransportError) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from([Err(error)])),
                ..Self::default()
            }
        }

        fn sent_frames(&self) -> Vec<Frame> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(bytes, _)| decode_frame(bytes).unwrap())
                .collect()
        }
    }

    impl Transport for MockTransport {
        fn send(
            &self,
            request: Vec<u8>,
            options: &RequestOptions,
        ) -> impl Future<Output = std::result::Result<Vec<u8>, TransportError>> + Send {
            self.sent.lock().unwrap().push((request, options.clone()));
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Endpoint("no reply queued".into())));
            async move { reply }
        }
    }

    fn reply(status: StatusCode, request_id: u32, groups: &[AttributeGroup]) -> Vec<u8> {
        let mut buf = vec![0x02, 0x01];
        buf.extend_from_slice(&status.0.to_be_bytes());
        buf.extend_from_slice(&request_id.to_be_bytes());
        AttributeGroup::new(GroupTag::OperationAttributes)
            .with("attributes-charset", Value::charset("utf-8"))
            .with("attributes-natural-language", Value::natural_language("en"))
            .encode(&mut buf)
            .unwrap();
        for group in groups {
            group.encode(&mut buf).unwrap();
        }
        buf.push(GroupTag::EndOfAttributes.code());
        buf
    }

    fn ok(request_id: u32, groups: &[AttributeGroup]) -> Vec<u8> {
        reply(StatusCode::SUCCESSFUL_OK, request_id, groups)
    }

    fn printer_group(name: &str, state: PrinterState) -> AttributeGroup {
        AttributeGroup::new(GroupTag::PrinterAttributes)
            .with("printer-uri-supported", Value::uri(format!("ipp://localhost:631/printers/{name}")))
            .with("printer-name", Value::name(name))
            .with("printer-state", Value::Enum(state.ipp_enum_value()))
    }

    fn job_group(id: i32, state: JobState) -> AttributeGroup {
        AttributeGroup::new(GroupTag::JobAttributes)
            .with("job-id", Value::Integer(id))
            .with("job-uri", Value::uri(format!("ipp://localhost:631/jobs/{id}")))
            .with("job-state", Value::Enum(state.ipp_enum_value()))
    }

    fn client(transport: MockTransport) -> CupsClient<MockTransport> {
        CupsClient::new(ServerConfig::default(), transport)
    }

    fn keywords<'a>(frame: &'a Frame, name: &'a str) -> Vec<&'a str> {
        frame.groups[0].values(name).filter_map(Value::as_str).collect()
    }

    #[tokio::test]
    async fn list_printers_projects_each_group() {
        let client = client(MockTransport::replying([ok(
            1,
            &[
                printer_group("Office-1", PrinterState::Idle),
                printer_group("Lab", PrinterState::Stopped),
            ],
        )]));

        let printers = client.list_printers(&AttributeQuery::new()).await.unwrap();
        assert_eq!(printers.len(), 2);
        assert_eq!(printers[0].name(), Some("Office-1"));
        assert_eq!(printers[1].state(), Some(PrinterState::Stopped));

        let sent = client.transport().sent_frames();
        assert_eq!(sent[0].code, Operation::CupsGetPrinters.code());
        assert_eq!(sent[0].version, IppVersion::V2_1);
    }

    #[tokio::test]
    async fn list_jobs_defaults_to_not_completed() {
        let client = client(MockTransport::replying([ok(1, &[job_group(7, JobState::Pending)])]));

        let jobs = client
            .list_jobs("ipp://localhost:631/printers/Office-1", &JobQuery::new())
            .await
            .unwrap();
        assert_eq!(jobs[0].id(), Some(7));

        let frame = &client.transport().sent_frames()[0];
        assert_eq!(frame.code, Operation::GetJobs.code());
        assert_eq!(keywords(frame, "which-jobs"), ["not-completed"]);
        assert_eq!(keywords(frame, REQUESTED_ATTRIBUTES), DEFAULT_JOB_ATTRIBUTES);
    }

    #[tokio::test]
    async fn caller_extras_win_over_defaults() {
        let client = client(MockTransport::replying([ok(1, &[])]));
        let query = JobQuery::new()
            .which(WhichJobs::Completed)
            .extra(REQUESTED_ATTRIBUTES, Value::keyword("all"))
            .extra("my-jobs", Value::Boolean(true));

        let jobs = client.list_jobs("ipp://h/printers/p1", &query).await.unwrap();
        assert!(jobs.is_empty());

        let frame = &client.transport().sent_frames()[0];
        assert_eq!(keywords(frame, "which-jobs"), ["completed"]);
        assert_eq!(keywords(frame, REQUESTED_ATTRIBUTES), ["all"]);
        assert_eq!(frame.groups[0].get("my-jobs"), Some(&Value::Boolean(true)));
    }

    #[tokio::test]
    async fn get_job_sends_job_uri_and_requested_attributes() {
        let client = client(MockTransport::replying([ok(1, &[job_group(3, JobState::Completed)])]));
        let query = AttributeQuery::new().requested(["job-state", "job-name"]);

        let job = client
            .get_job("ipp://localhost:631/jobs/3", &query)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(job.state(), Some(JobState::Completed));

        let frame = &client.transport().sent_frames()[0];
        assert_eq!(frame.code, Operation::GetJobAttributes.code());
        assert_eq!(keywords(frame, JOB_URI), ["ipp://localhost:631/jobs/3"]);
        assert_eq!(keywords(frame, REQUESTED_ATTRIBUTES), ["job-state", "job-name"]);
    }

    #[tokio::test]
    async fn missing_printer_is_none() {
        let client = client(MockTransport::replying([reply(
            StatusCode::CLIENT_ERROR_NOT_FOUND,
            1,
            &[],
        )]));
        let printer = client
            .get_printer("ipp://localhost:631/printers/nope", &AttributeQuery::new())
            .await.unwrap();
        assert!(printer.is_none());
    }

    #[tokio::test]
    async fn error_status_becomes_server_status() {
        let mut failure = reply(StatusCode::CLIENT_ERROR_NOT_AUTHORIZED, 1, &[]);
        // Re-encode with a status-message in the operation group.
        failure.truncate(8);
        AttributeGroup::new(GroupTag::OperationAttributes)
            .with("attributes-charset", Value::charset("utf-8"))
            .with("status-message", Value::text("Forbidden"))
            .encode(&mut failure)
            .unwrap();
        failure.push(0x03);

        let client = client(MockTransport::replying([failure]));
        let err = client
            .cancel_job("ipp://localhost:631/jobs/9", &AttributeQuery::new())
            .await.unwrap_err();
        match err {
            InkwireError::ServerStatus {
                operation,
                status,
                message,
            } => {
                assert_eq!(operation, Operation::CancelJob);
                assert_eq!(status, StatusCode::CLIENT_ERROR_NOT_AUTHORIZED);
                assert_eq!(message.as_deref(), Some("Forbidden"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_not_malformed() {
        let client = client(MockTransport::failing(TransportError::HttpStatus(503)));
        let err = client.list_printers(&AttributeQuery::new()).await.unwrap_err();
        assert!(matches!(
            err,
            InkwireError::TransportFailed {
                operation: Operation::CupsGetPrinters,
                source: TransportError::HttpStatus(503)
            }
        ));
    }

    #[tokio::test]
    async fn garbage_reply_is_malformed() {
        let client = client(MockTransport::replying([vec![0x02, 0x01, 0x00]]));
        let err = client.list_printers(&AttributeQuery::new()).await.unwrap_err();
        assert!(matches!(err, InkwireError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn create_job_returns_created_job() {
        let client = client(MockTransport::replying([ok(
            1,
            &[job_group(12, JobState::Pending)],
        )]));
        let job = JobBuilder::new()
            .printer("ipp://localhost:631/printers/Office-1")
            .title("report")
            .content(b"%PDF-1.7".to_vec());

        let created = client.create_job(&job, &AttributeQuery::new()).await.unwrap().unwrap();
        assert_eq!(created.id(), Some(12));
        assert_eq!(created.state(), Some(JobState::Pending));

        let frame = &client.transport().sent_frames()[0];
        assert_eq!(frame.code, Operation::PrintJob.code());
        assert_eq!(frame.version, IppVersion::V2_1);
        assert_eq!(frame.data, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn configured_user_is_added_unless_supplied() {
        let config = ServerConfig {
            requesting_user_name: Some("Zoë".into()),
            ..ServerConfig::default()
        };
        let client = CupsClient::new(
            config,
            MockTransport::replying([ok(1, &[]), ok(2, &[job_group(1, JobState::Pending)])]),
        );

        client.list_printers(&AttributeQuery::new()).await.unwrap();
        let job = JobBuilder::new()
            .printer("ipp://localhost:631/printers/p1")
            .requesting_user("bob");
        client.create_job(&job, &AttributeQuery::new()).await.unwrap();

        let frames = client.transport().sent_frames();
        assert_eq!(frames[0].groups[0].get(REQUESTING_USER_NAME), Some(&Value::name("Zoe")));
        assert_eq!(frames[1].groups[0].values(REQUESTING_USER_NAME).count(), 1);
        assert_eq!(frames[1].groups[0].get(REQUESTING_USER_NAME), Some(&Value::name("bob")));
    }

    #[tokio::test]
    async fn request_ids_increase() {
        let client = client(MockTransport::replying([ok(1, &[]), ok(2, &[]), ok(3, &[])]));
        client.list_printers(&AttributeQuery::new()).await.unwrap();
        client.default_printer(&AttributeQuery::new()).await.unwrap();
        client
            .cancel_job("ipp://localhost:631/jobs/1", &AttributeQuery::new())
            .await.unwrap();

        let ids: Vec<u32> = client
            .transport()
            .sent_frames()
            .iter()
            .map(|f| f.request_id)
            .collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[tokio::test]
    async fn request_options_are_passed_to_the_transport() {
        let client = client(MockTransport::replying([ok(1, &[])]))
            .with_request_options(RequestOptions::at("/admin"));
        client.list_printers(&AttributeQuery::new()).await.unwrap();
        let sent = client.transport().sent.lock().unwrap();
        assert_eq!(sent[0].1.path, "/admin");
    }

    #[tokio::test]
    async fn per_call_options_override_the_client_options() {
        let client = client(MockTransport::replying([ok(1, &[]), ok(2, &[])]))
            .with_request_options(RequestOptions::at("/admin"));
        let query = AttributeQuery::new()
            .options(RequestOptions::at("/printers/Office-1").with_timeout(Duration::from_secs(3)));

        client
            .get_printer("ipp://localhost:631/printers/Office-1", &query)
            .await
            .unwrap();
        client
            .cancel_job("ipp://localhost:631/jobs/4", &AttributeQuery::new())
            .await
            .unwrap();

        let sent = client.transport().sent.lock().unwrap();
        assert_eq!(sent[0].1.path, "/printers/Office-1");
        assert_eq!(sent[0].1.timeout, Some(Duration::from_secs(3)));
        assert_eq!(sent[1].1, RequestOptions::at("/admin"));
    }

    #[tokio::test]
    async fn printer_lookups_send_only_what_is_asked_for() {
        let client = client(MockTransport::replying([ok(1, &[]), ok(2, &[])]));
        client.list_printers(&AttributeQuery::new()).await.unwrap();
        let query = AttributeQuery::new()
            .requested(["printer-name", "printer-state"])
            .extra("printer-type", Value::Enum(0))
            .extra("first-printer-name", Value::name("Lab"));
        client.list_printers(&query).await.unwrap();

        let frames = client.transport().sent_frames();
        assert!(!frames[0].groups[0].contains(REQUESTED_ATTRIBUTES));
        assert_eq!(keywords(&frames[1], REQUESTED_ATTRIBUTES), ["printer-name", "printer-state"]);
        assert_eq!(frames[1].groups[0].get("printer-type"), Some(&Value::Enum(0)));
        assert_eq!(frames[1].groups[0].get("first-printer-name"), Some(&Value::name("Lab")));
    }

    #[tokio::test]
    async fn create_job_extras_replace_job_attributes() {
        let client = client(MockTransport::replying([ok(1, &[job_group(5, JobState::Pending)])]));
        let job = JobBuilder::new()
            .printer("ipp://localhost:631/printers/p1")
            .title("draft");
        let query = AttributeQuery::new().extra("job-name", Value::name("final"));

        client.create_job(&job, &query).await.unwrap();

        let frame = &client.transport().sent_frames()[0];
        assert_eq!(frame.groups[0].values("job-name").count(), 1);
        assert_eq!(frame.groups[0].get("job-name"), Some(&Value::name("final")));
        assert!(!frame.groups[0].contains(REQUESTED_ATTRIBUTES));
    }

    #[test]
    fn request_ids_stay_in_range_and_skip_zero() {
        let client = client(MockTransport::default());
        client.next_request_id.store(MAX_REQUEST_ID, Ordering::Relaxed);
        let ids = [client.next_request_id(), client.next_request_id()];
        assert_eq!(ids, [MAX_REQUEST_ID, 1]);

        client.next_request_id.store(u32::MAX, Ordering::Relaxed);
        assert_eq!(client.next_request_id(), MAX_REQUEST_ID);
        assert_eq!(client.next_request_id(), 1);
    }

    #[tokio::test]
    async fn submit_rejects_invalid_requests_before_sending() {
        let client = client(MockTransport::default());
        let err = client
            .submit(client.request(Operation::GetPrinterAttributes))
            .await
            .unwrap_err();
        assert!(matches!(err, InkwireError::Build(BuildError::MissingAttribute { .. })));
        assert!(client.transport().sent.lock().unwrap().is_empty());
    }
}
