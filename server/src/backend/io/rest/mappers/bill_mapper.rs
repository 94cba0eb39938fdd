use shared::{
    Bill as BillDto, BillFrequency as BillFrequencyDto, BillListRequest,
    BillStatus as BillStatusDto, BillSummary as BillSummaryDto, BillTotals as BillTotalsDto,
    CreateBillRequest, DueBucket as DueBucketDto, PayBillResponse, UpdateBillRequest,
};

use super::transaction_mapper::TransactionMapper;
use super::{parse_timestamp, sort_to_domain};
use crate::backend::domain::classifier::{BillStatus, BillSummary, BillTotals, DueBucket};
use crate::backend::domain::commands::bills::{
    BillListQuery, BillView, CreateBillCommand, PayBillResult, UpdateBillCommand,
};
use crate::backend::domain::errors::DomainResult;
use crate::backend::domain::models::bill::BillFrequency;

pub struct BillMapper;

impl BillMapper {
    pub fn frequency_to_domain(dto: BillFrequencyDto) -> BillFrequency {
        match dto {
            BillFrequencyDto::Weekly => BillFrequency::Weekly,
            BillFrequencyDto::Monthly => BillFrequency::Monthly,
            BillFrequencyDto::Quarterly => BillFrequency::Quarterly,
            BillFrequencyDto::Yearly => BillFrequency::Yearly,
        }
    }

    pub fn frequency_to_dto(domain: BillFrequency) -> BillFrequencyDto {
        match domain {
            BillFrequency::Weekly => BillFrequencyDto::Weekly,
            BillFrequency::Monthly => BillFrequencyDto::Monthly,
            BillFrequency::Quarterly => BillFrequencyDto::Quarterly,
            BillFrequency::Yearly => BillFrequencyDto::Yearly,
        }
    }

    pub fn status_to_domain(dto: BillStatusDto) -> BillStatus {
        match dto {
            BillStatusDto::Paid => BillStatus::Paid,
            BillStatusDto::Pending => BillStatus::Pending,
            BillStatusDto::Overdue => BillStatus::Overdue,
        }
    }

    pub fn status_to_dto(domain: BillStatus) -> BillStatusDto {
        match domain {
            BillStatus::Paid => BillStatusDto::Paid,
            BillStatus::Pending => BillStatusDto::Pending,
            BillStatus::Overdue => BillStatusDto::Overdue,
        }
    }

    pub fn bucket_to_dto(domain: DueBucket) -> DueBucketDto {
        match domain {
            DueBucket::Overdue => DueBucketDto::Overdue,
            DueBucket::DueSoon => DueBucketDto::DueSoon,
            DueBucket::Upcoming => DueBucketDto::Upcoming,
        }
    }

    pub fn to_dto(view: BillView) -> BillDto {
        let BillView { bill, assessment } = view;
        BillDto {
            id: bill.id,
            name: bill.name,
            amount: bill.amount,
            due_date: bill.due_date.to_rfc3339(),
            category: bill.category,
            is_paid: bill.is_paid,
            frequency: bill.frequency.map(Self::frequency_to_dto),
            status: Self::status_to_dto(assessment.status),
            days_until_due: assessment.days_until_due,
            due_bucket: Self::bucket_to_dto(assessment.due_bucket),
        }
    }

    pub fn to_dto_list(views: Vec<BillView>) -> Vec<BillDto> {
        views.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateBillRequest) -> DomainResult<CreateBillCommand> {
        Ok(CreateBillCommand {
            name: request.name,
            amount: request.amount,
            due_date: parse_timestamp("due_date", &request.due_date)?,
            category: request.category,
            frequency: request.frequency.map(Self::frequency_to_domain),
            is_paid: request.is_paid.unwrap_or(false),
        })
    }

    pub fn to_update_command(request: UpdateBillRequest) -> DomainResult<UpdateBillCommand> {
        Ok(UpdateBillCommand {
            name: request.name,
            amount: request.amount,
            due_date: request
                .due_date
                .as_deref()
                .map(|d| parse_timestamp("due_date", d))
                .transpose()?,
            category: request.category,
            frequency: request.frequency.map(Self::frequency_to_domain),
            is_paid: request.is_paid,
        })
    }

    pub fn to_list_query(request: BillListRequest) -> BillListQuery {
        BillListQuery {
            search: request.search,
            status: request.status.map(Self::status_to_domain),
            sort: request.sort.map(sort_to_domain).unwrap_or_default(),
        }
    }

    fn totals_to_dto(domain: BillTotals) -> BillTotalsDto {
        BillTotalsDto {
            count: domain.count,
            total: domain.total,
        }
    }

    pub fn summary_to_dto(domain: BillSummary) -> BillSummaryDto {
        BillSummaryDto {
            paid: Self::totals_to_dto(domain.paid),
            upcoming: Self::totals_to_dto(domain.upcoming),
            due_soon: Self::totals_to_dto(domain.due_soon),
            overdue: Self::totals_to_dto(domain.overdue),
        }
    }

    pub fn to_pay_response(result: PayBillResult) -> PayBillResponse {
        let success_message = if result.transaction.is_some() {
            "Bill paid and expense recorded".to_string()
        } else {
            "Bill marked as paid".to_string()
        };

        PayBillResponse {
            bill: Self::to_dto(result.bill),
            transaction: result.transaction.map(TransactionMapper::to_dto),
            reconciled_budgets: TransactionMapper::reconciled_to_dto(result.reconciled_budgets),
            success_message,
        }
    }
}
