use std::time::Duration;

use http_health_check::check::{run, Status};
use http_health_check::config::Timeout;
use http_health_check::reporter::{Capture, Line};
use http_health_check_test_helpers::stub_server::{closed_health_url, Behaviour, Method, StatusCode, StubServer};

use crate::health_check::plain_config;

mod given_a_healthy_endpoint {
    use super::*;

    #[tokio::test]
    async fn it_should_succeed_when_the_endpoint_answers_200_within_the_timeout() {
        let server = StubServer::start(Behaviour::responding(StatusCode::OK)).await;
        let url = server.health_url();
        let reporter = Capture::new();

        let status = run(&plain_config("GET", &url, Timeout::from_secs(5)), &reporter).await;

        assert_eq!(status, Status::Success);
        assert_eq!(server.hits(), 1);
        assert_eq!(
            reporter.lines(),
            vec![
                Line::Info(format!("Querying Endpoint {url}")),
                Line::Info(format!("Health check {url}: HTTP status code 200 OK")),
            ]
        );
    }

    #[tokio::test]
    async fn it_should_succeed_when_a_slow_endpoint_still_answers_within_the_timeout() {
        let server = StubServer::start(Behaviour::responding(StatusCode::OK).after(Duration::from_secs(2))).await;
        let reporter = Capture::new();

        let status = run(&plain_config("GET", &server.health_url(), Timeout::from_secs(5)), &reporter).await;

        assert_eq!(status, Status::Success);
        assert!(reporter.errors().is_empty());
    }

    #[tokio::test]
    async fn it_should_succeed_for_any_status_code_up_to_299() {
        let server = StubServer::start(Behaviour::responding(StatusCode::NO_CONTENT)).await;
        let reporter = Capture::new();

        let status = run(&plain_config("GET", &server.health_url(), Timeout::from_secs(5)), &reporter).await;

        assert_eq!(status, Status::Success);
    }

    #[tokio::test]
    async fn it_should_send_the_method_upper_cased() {
        let server = StubServer::start(Behaviour::default()).await;
        let reporter = Capture::new();

        let status = run(&plain_config("head", &server.health_url(), Timeout::from_secs(5)), &reporter).await;

        assert_eq!(status, Status::Success);
        assert_eq!(server.methods(), vec![Method::HEAD]);
    }

    #[tokio::test]
    async fn it_should_send_the_configured_method() {
        let server = StubServer::start(Behaviour::default()).await;
        let reporter = Capture::new();

        let status = run(&plain_config("POST", &server.health_url(), Timeout::from_secs(5)), &reporter).await;

        assert_eq!(status, Status::Success);
        assert_eq!(server.methods(), vec![Method::POST]);
    }

    #[tokio::test]
    async fn it_should_not_time_out_when_the_timeout_is_zero() {
        let server = StubServer::start(Behaviour::default().after(Duration::from_millis(200))).await;
        let reporter = Capture::new();

        let status = run(&plain_config("GET", &server.health_url(), Timeout::from_secs(0)), &reporter).await;

        assert_eq!(status, Status::Success);
    }
}

mod given_an_unhealthy_endpoint {
    use super::*;

    #[tokio::test]
    async fn it_should_fail_when_the_endpoint_answers_500() {
        let server = StubServer::start(Behaviour::responding(StatusCode::INTERNAL_SERVER_ERROR)).await;
        let url = server.health_url();
        let reporter = Capture::new();

        let status = run(&plain_config("GET", &url, Timeout::from_secs(5)), &reporter).await;

        assert_eq!(status, Status::Failure);
        assert_eq!(reporter.errors(), vec![format!("Health check {url}: Error - status code 500")]);
    }

    #[tokio::test]
    async fn it_should_fail_for_any_status_code_greater_than_299() {
        for code in [StatusCode::NOT_MODIFIED, StatusCode::NOT_FOUND, StatusCode::SERVICE_UNAVAILABLE] {
            let server = StubServer::start(Behaviour::responding(code)).await;
            let reporter = Capture::new();

            let status = run(&plain_config("GET", &server.health_url(), Timeout::from_secs(5)), &reporter).await;

            assert_eq!(status, Status::Failure, "status code {code} should be unhealthy");
        }
    }

    #[tokio::test]
    async fn it_should_fail_when_the_endpoint_answers_after_the_timeout() {
        let server = StubServer::start(Behaviour::responding(StatusCode::OK).after(Duration::from_secs(2))).await;
        let url = server.health_url();
        let reporter = Capture::new();

        let status = run(&plain_config("GET", &url, Timeout::from_secs(1)), &reporter).await;

        assert_eq!(status, Status::Failure);

        let errors = reporter.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with(&format!("Health check {url}: Error ")));
    }

    #[tokio::test]
    async fn it_should_fail_when_nothing_listens_on_the_endpoint() {
        let url = closed_health_url();
        let reporter = Capture::new();

        let status = run(&plain_config("GET", &url, Timeout::from_secs(5)), &reporter).await;

        assert_eq!(status, Status::Failure);
        assert_eq!(reporter.errors().len(), 1);
    }
}

mod given_a_url_that_is_not_normalized {
    use super::*;

    #[tokio::test]
    async fn it_should_report_the_normalized_url_in_every_line() {
        let server = StubServer::start(Behaviour::default()).await;
        let addr = server.addr();
        let reporter = Capture::new();

        // Without a path the request goes to `/`, which the stub server doesn't serve.
        let status = run(&plain_config("GET", &format!("http://{addr}"), Timeout::from_secs(5)), &reporter).await;

        assert_eq!(status, Status::Failure);
        assert_eq!(
            reporter.lines(),
            vec![
                Line::Info(format!("Querying Endpoint http://{addr}/")),
                Line::Error(format!("Health check http://{addr}/: Error - status code 404")),
            ]
        );
    }
}

mod given_an_invalid_configuration {
    use super::*;

    #[tokio::test]
    async fn it_should_fail_without_sending_a_request_when_the_timeout_is_out_of_bounds() {
        let server = StubServer::start(Behaviour::default()).await;

        for timeout in [Timeout::from_secs(-1), Timeout::from_secs(361), Timeout::from_millis(360_001)] {
            let reporter = Capture::new();

            let status = run(&plain_config("GET", &server.health_url(), timeout), &reporter).await;

            assert_eq!(status, Status::Failure);
            assert_eq!(
                reporter.lines(),
                vec![Line::Error("The timeout must be between 0 and 360 seconds".to_owned())]
            );
        }

        assert_eq!(server.hits(), 0);
    }

    #[tokio::test]
    async fn it_should_fail_without_sending_a_request_when_the_url_is_malformed() {
        let server = StubServer::start(Behaviour::default()).await;

        for url in ["invalid-url", "/health", "http://"] {
            let reporter = Capture::new();

            let status = run(&plain_config("GET", url, Timeout::from_secs(5)), &reporter).await;

            assert_eq!(status, Status::Failure);
            assert_eq!(reporter.errors(), vec!["The health check URL must be valid".to_owned()]);
        }

        assert_eq!(server.hits(), 0);
    }

    #[tokio::test]
    async fn it_should_fail_without_sending_a_request_when_the_method_is_invalid() {
        let server = StubServer::start(Behaviour::default()).await;

        for method in ["TEAPOT", "teapot", "INVALID", ""] {
            let reporter = Capture::new();

            let status = run(&plain_config(method, &server.health_url(), Timeout::from_secs(5)), &reporter).await;

            assert_eq!(status, Status::Failure);
            assert_eq!(reporter.errors(), vec!["The method must be a valid HTTP method".to_owned()]);
        }

        assert_eq!(server.hits(), 0);
    }
}
