//! A hand-registered reference gateway covering the six end-to-end
//! seed scenarios. Built directly against [`Registry`] rather than
//! through `truss-parse`/`truss-codegen`: this fixture plays the part
//! of generated `register_*` code, not of a source file under
//! extraction.

use serde::{Deserialize, Serialize};
use truss_core::model::{HttpMethod, JsonKind};
use truss_core::{RequestContext, RpcError};
use truss_gateway::{json_response, Endpoint, Gateway, Redirector, Registry};

#[derive(Debug, Deserialize)]
struct AddRequest {
    a: i64,
    b: i64,
}

#[derive(Debug, Serialize)]
struct AddResponse {
    result: i64,
}
impl Redirector for AddResponse {}

#[derive(Debug, Deserialize)]
struct QueueRequest {}

#[derive(Debug, Serialize)]
struct QueueResponse {
    queued: bool,
}
impl Redirector for QueueResponse {}

#[derive(Debug, Deserialize)]
struct Page {
    limit: i64,
    offset: i64,
    order: String,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    page: Page,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    limit: i64,
    offset: i64,
    order: String,
}
impl Redirector for SearchResponse {}

#[derive(Debug, Deserialize)]
struct PingRequest {}

#[derive(Debug, Serialize)]
struct PingResponse {
    dont_panic: Option<i64>,
}
impl Redirector for PingResponse {}

/// Scenarios 1-3: default convention routing, a `GET` with path-bound
/// parameters, and a non-200 success status.
struct CalculatorService;

impl CalculatorService {
    async fn add(&self, _ctx: RequestContext, req: AddRequest) -> Result<AddResponse, RpcError> {
        Ok(AddResponse { result: req.a + req.b })
    }

    async fn queue(&self, _ctx: RequestContext, _req: QueueRequest) -> Result<QueueResponse, RpcError> {
        Ok(QueueResponse { queued: true })
    }
}

/// Scenario 5: nested query-string binding into a `Page` record.
struct SearchService;

impl SearchService {
    async fn search(&self, _ctx: RequestContext, req: SearchRequest) -> Result<SearchResponse, RpcError> {
        Ok(SearchResponse {
            limit: req.page.limit,
            offset: req.page.offset,
            order: req.page.order,
        })
    }
}

/// Scenario 6: a metadata value set by the caller is visible to the
/// handler across exactly one hop.
struct PingService;

impl PingService {
    async fn ping(&self, ctx: RequestContext, _req: PingRequest) -> Result<PingResponse, RpcError> {
        Ok(PingResponse {
            dont_panic: ctx.metadata().get::<i64>("DontPanic"),
        })
    }
}

fn calculator_gateway() -> Gateway {
    let mut registry: Registry<CalculatorService> = Registry::new();

    registry.add(
        Endpoint {
            service: "CalculatorService".into(),
            function: "Add".into(),
            method: HttpMethod::Post,
            path: "/CalculatorService.Add".into(),
            success_status: 200,
        },
        |service, ctx, request| {
            Box::pin(async move {
                let parsed: AddRequest = request.bind(&[("a", JsonKind::Number), ("b", JsonKind::Number)])?;
                let response = service.add(ctx, parsed).await?;
                json_response(200, &response)
            })
        },
    );

    registry.add(
        Endpoint {
            service: "CalculatorService".into(),
            function: "AddRestful".into(),
            method: HttpMethod::Get,
            path: "/addition/:a/:b".into(),
            success_status: 200,
        },
        |service, ctx, request| {
            Box::pin(async move {
                let parsed: AddRequest = request.bind(&[("a", JsonKind::Number), ("b", JsonKind::Number)])?;
                let response = service.add(ctx, parsed).await?;
                json_response(200, &response)
            })
        },
    );

    registry.add(
        Endpoint {
            service: "CalculatorService".into(),
            function: "Queue".into(),
            method: HttpMethod::Post,
            path: "/CalculatorService.Queue".into(),
            success_status: 202,
        },
        |service, ctx, request| {
            Box::pin(async move {
                let parsed: QueueRequest = request.bind(&[])?;
                let response = service.queue(ctx, parsed).await?;
                json_response(202, &response)
            })
        },
    );

    registry.build(CalculatorService)
}

/// A distinct `AddV2` endpoint mounted under `/v2` (path-prefix
/// scenario): reachable at `/v2/CalculatorService.AddV2`, 404 at
/// the unprefixed path since it has no unprefixed counterpart.
fn calculator_v2_gateway() -> Gateway {
    let mut registry: Registry<CalculatorService> = Registry::new().with_prefix("/v2");

    registry.add(
        Endpoint {
            service: "CalculatorService".into(),
            function: "AddV2".into(),
            method: HttpMethod::Post,
            path: "/CalculatorService.AddV2".into(),
            success_status: 200,
        },
        |service, ctx, request| {
            Box::pin(async move {
                let parsed: AddRequest = request.bind(&[("a", JsonKind::Number), ("b", JsonKind::Number)])?;
                let response = service.add(ctx, parsed).await?;
                json_response(200, &response)
            })
        },
    );

    registry.build(CalculatorService)
}

fn search_gateway() -> Gateway {
    let mut registry: Registry<SearchService> = Registry::new();

    registry.add(
        Endpoint {
            service: "SearchService".into(),
            function: "Search".into(),
            method: HttpMethod::Get,
            path: "/search".into(),
            success_status: 200,
        },
        |service, ctx, request| {
            Box::pin(async move {
                let parsed: SearchRequest = request.bind(&[
                    ("page.limit", JsonKind::Number),
                    ("page.offset", JsonKind::Number),
                    ("page.order", JsonKind::String),
                ])?;
                let response = service.search(ctx, parsed).await?;
                json_response(200, &response)
            })
        },
    );

    registry.build(SearchService)
}

fn ping_gateway() -> Gateway {
    let mut registry: Registry<PingService> = Registry::new();

    registry.add(
        Endpoint {
            service: "PingService".into(),
            function: "Ping".into(),
            method: HttpMethod::Post,
            path: "/PingService.Ping".into(),
            success_status: 200,
        },
        |service, ctx, request| {
            Box::pin(async move {
                let parsed: PingRequest = request.bind(&[])?;
                let response = service.ping(ctx, parsed).await?;
                json_response(200, &response)
            })
        },
    );

    registry.build(PingService)
}

/// The fixture gateway: `CalculatorService`, its `/v2`-prefixed twin,
/// `SearchService`, and `PingService` merged onto one router.
pub fn build_gateway() -> Gateway {
    calculator_gateway()
        .merge(calculator_v2_gateway())
        .merge(search_gateway())
        .merge(ping_gateway())
}
