use crate::{
    api::{attendance, employee, holiday, lead, payroll, salary},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_read_per_min))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{id}/salary
                    .service(
                        web::resource("/{id}/salary")
                            .route(web::post().to(salary::add_salary_entry))
                            .route(web::get().to(salary::list_salary_history)),
                    )
                    // /employees/{id}/salary/{entry_id}
                    .service(
                        web::resource("/{id}/salary/{entry_id}")
                            .route(web::put().to(salary::update_salary_entry)),
                    ),
            )
            .service(
                // The attendance surface is polled by clients, so it carries
                // its own tighter budget.
                web::scope("/attendance")
                    .wrap(build_limiter(config.rate_write_per_min))
                    .service(
                        web::resource("/{employee_id}/check-in")
                            .route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/{employee_id}/check-out")
                            .route(web::put().to(attendance::check_out)),
                    )
                    .service(
                        web::resource("/{employee_id}/calendar")
                            .route(web::get().to(attendance::month_calendar)),
                    ),
            )
            .service(
                web::scope("/lead")
                    .wrap(build_limiter(config.rate_write_per_min))
                    // /lead
                    .service(
                        web::resource("")
                            .route(web::get().to(lead::lead_list))
                            .route(web::post().to(lead::create_lead)),
                    )
                    // /lead/{id}
                    .service(web::resource("/{id}").route(web::get().to(lead::get_lead)))
                    // /lead/{id}/won
                    .service(web::resource("/{id}/won").route(web::put().to(lead::mark_won)))
                    // /lead/{id}/lost
                    .service(web::resource("/{id}/lost").route(web::put().to(lead::mark_lost))),
            )
            .service(
                web::scope("/payroll")
                    // /payroll
                    .service(
                        web::resource("")
                            .route(web::post().to(payroll::create_payroll))
                            .route(web::get().to(payroll::list_payrolls)),
                    )
                    // /payroll/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(payroll::get_payroll))
                            .route(web::put().to(payroll::update_payroll)),
                    ),
            )
            .service(
                web::scope("/holiday").service(
                    web::resource("")
                        .route(web::post().to(holiday::create_holiday))
                        .route(web::get().to(holiday::list_holidays)),
                ),
            ),
    );
}
