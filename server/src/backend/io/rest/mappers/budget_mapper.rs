use shared::{
    Budget as BudgetDto, BudgetAlerts as BudgetAlertsDto, BudgetDrift as BudgetDriftDto,
    BudgetPeriod as BudgetPeriodDto, BudgetStatus as BudgetStatusDto, CreateBudgetRequest,
    DriftReportResponse, UpdateBudgetRequest,
};

use super::{format_date, parse_date};
use crate::backend::domain::classifier::BudgetStatus;
use crate::backend::domain::commands::budgets::{
    BudgetView, CreateBudgetCommand, DriftReport, UpdateBudgetCommand,
};
use crate::backend::domain::errors::DomainResult;
use crate::backend::domain::models::budget::{BudgetAlerts, BudgetPeriod};

pub struct BudgetMapper;

impl BudgetMapper {
    pub fn period_to_domain(dto: BudgetPeriodDto) -> BudgetPeriod {
        match dto {
            BudgetPeriodDto::Monthly => BudgetPeriod::Monthly,
            BudgetPeriodDto::Quarterly => BudgetPeriod::Quarterly,
            BudgetPeriodDto::Yearly => BudgetPeriod::Yearly,
        }
    }

    pub fn period_to_dto(domain: BudgetPeriod) -> BudgetPeriodDto {
        match domain {
            BudgetPeriod::Monthly => BudgetPeriodDto::Monthly,
            BudgetPeriod::Quarterly => BudgetPeriodDto::Quarterly,
            BudgetPeriod::Yearly => BudgetPeriodDto::Yearly,
        }
    }

    pub fn status_to_dto(domain: BudgetStatus) -> BudgetStatusDto {
        match domain {
            BudgetStatus::Under => BudgetStatusDto::Under,
            BudgetStatus::Near => BudgetStatusDto::Near,
            BudgetStatus::Over => BudgetStatusDto::Over,
        }
    }

    pub fn alerts_to_domain(dto: BudgetAlertsDto) -> BudgetAlerts {
        BudgetAlerts {
            enabled: dto.enabled,
            threshold: dto.threshold,
        }
    }

    pub fn alerts_to_dto(domain: BudgetAlerts) -> BudgetAlertsDto {
        BudgetAlertsDto {
            enabled: domain.enabled,
            threshold: domain.threshold,
        }
    }

    pub fn to_dto(view: BudgetView) -> BudgetDto {
        let BudgetView { budget, assessment } = view;
        BudgetDto {
            id: budget.id,
            category: budget.category,
            amount: budget.amount,
            spent: budget.spent,
            period: Self::period_to_dto(budget.period),
            start_date: format_date(budget.start_date),
            end_date: budget.end_date.map(format_date),
            alerts: Self::alerts_to_dto(budget.alerts),
            status: Self::status_to_dto(assessment.status),
            remaining: assessment.remaining,
            percentage_used: assessment.percentage_used,
        }
    }

    pub fn to_dto_list(views: Vec<BudgetView>) -> Vec<BudgetDto> {
        views.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateBudgetRequest) -> DomainResult<CreateBudgetCommand> {
        Ok(CreateBudgetCommand {
            category: request.category,
            amount: request.amount,
            period: Self::period_to_domain(request.period),
            start_date: request
                .start_date
                .as_deref()
                .map(|d| parse_date("start_date", d))
                .transpose()?,
            end_date: request
                .end_date
                .as_deref()
                .map(|d| parse_date("end_date", d))
                .transpose()?,
            alerts: request.alerts.map(Self::alerts_to_domain),
        })
    }

    pub fn to_update_command(request: UpdateBudgetRequest) -> DomainResult<UpdateBudgetCommand> {
        Ok(UpdateBudgetCommand {
            category: request.category,
            amount: request.amount,
            period: request.period.map(Self::period_to_domain),
            start_date: request
                .start_date
                .as_deref()
                .map(|d| parse_date("start_date", d))
                .transpose()?,
            end_date: request
                .end_date
                .as_deref()
                .map(|d| parse_date("end_date", d))
                .transpose()?,
            alerts: request.alerts.map(Self::alerts_to_domain),
        })
    }

    pub fn to_drift_response(report: DriftReport) -> DriftReportResponse {
        DriftReportResponse {
            checked: report.checked,
            drifted: report
                .drifted
                .into_iter()
                .map(|d| BudgetDriftDto {
                    budget_id: d.budget_id,
                    category: d.category,
                    cached_spent: d.cached_spent,
                    ledger_spent: d.ledger_spent,
                })
                .collect(),
        }
    }
}
