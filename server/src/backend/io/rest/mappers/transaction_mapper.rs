use shared::{
    CreateTransactionRequest, DeleteTransactionResponse, ReconciledBudget as ReconciledBudgetDto,
    Transaction as TransactionDto, TransactionListRequest, TransactionListResponse,
    TransactionMutationResponse, TransactionType as TransactionTypeDto, UpdateTransactionRequest,
};

use super::{format_date, parse_date, sort_to_domain};
use crate::backend::domain::commands::transactions::{
    CreateTransactionCommand, DeleteTransactionResult, TransactionListQuery,
    TransactionListResult, TransactionMutationResult, UpdateTransactionCommand,
};
use crate::backend::domain::errors::DomainResult;
use crate::backend::domain::models::transaction::{from_signed_amount, Transaction, TransactionType};
use crate::backend::domain::reconciler::ReconciledBudget;

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn type_to_domain(dto: TransactionTypeDto) -> TransactionType {
        match dto {
            TransactionTypeDto::Income => TransactionType::Income,
            TransactionTypeDto::Expense => TransactionType::Expense,
        }
    }

    pub fn type_to_dto(domain: TransactionType) -> TransactionTypeDto {
        match domain {
            TransactionType::Income => TransactionTypeDto::Income,
            TransactionType::Expense => TransactionTypeDto::Expense,
        }
    }

    pub fn to_dto(domain: Transaction) -> TransactionDto {
        TransactionDto {
            id: domain.id,
            description: domain.description,
            amount: domain.amount,
            category: domain.category,
            transaction_type: Self::type_to_dto(domain.transaction_type),
            date: format_date(domain.date),
        }
    }

    pub fn to_dto_list(domain: Vec<Transaction>) -> Vec<TransactionDto> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    /// Resolve amount and type. Without an explicit type the amount is a
    /// legacy signed value: negative means expense.
    fn resolve_amount(
        amount: f64,
        transaction_type: Option<TransactionTypeDto>,
    ) -> DomainResult<(f64, TransactionType)> {
        match transaction_type {
            Some(t) => Ok((amount, Self::type_to_domain(t))),
            None => from_signed_amount(amount),
        }
    }

    pub fn to_create_command(request: CreateTransactionRequest) -> DomainResult<CreateTransactionCommand> {
        let (amount, transaction_type) = Self::resolve_amount(request.amount, request.transaction_type)?;
        let date = request
            .date
            .as_deref()
            .map(|d| parse_date("date", d))
            .transpose()?;

        Ok(CreateTransactionCommand {
            description: request.description,
            amount,
            category: request.category,
            transaction_type,
            date,
        })
    }

    pub fn to_update_command(request: UpdateTransactionRequest) -> DomainResult<UpdateTransactionCommand> {
        // Only creates read direction from the sign. Without a type an edit
        // keeps the stored direction and the amount is taken as a magnitude.
        let amount = request.amount.map(f64::abs);
        let transaction_type = request.transaction_type.map(Self::type_to_domain);
        let date = request
            .date
            .as_deref()
            .map(|d| parse_date("date", d))
            .transpose()?;

        Ok(UpdateTransactionCommand {
            description: request.description,
            amount,
            category: request.category,
            transaction_type,
            date,
        })
    }

    pub fn to_list_query(request: TransactionListRequest) -> TransactionListQuery {
        TransactionListQuery {
            search: request.search,
            category: request.category,
            transaction_type: request.transaction_type.map(Self::type_to_domain),
            sort: request.sort.map(sort_to_domain).unwrap_or_default(),
            limit: request.limit,
            offset: request.offset,
        }
    }

    pub fn to_list_response(result: TransactionListResult) -> TransactionListResponse {
        TransactionListResponse {
            transactions: Self::to_dto_list(result.transactions),
            total_count: result.total_count,
        }
    }

    pub fn reconciled_to_dto(domain: Vec<ReconciledBudget>) -> Vec<ReconciledBudgetDto> {
        domain
            .into_iter()
            .map(|r| ReconciledBudgetDto {
                budget_id: r.budget_id,
                category: r.category,
                spent: r.spent,
            })
            .collect()
    }

    pub fn to_mutation_response(
        result: TransactionMutationResult,
        success_message: &str,
    ) -> TransactionMutationResponse {
        TransactionMutationResponse {
            transaction: Self::to_dto(result.transaction),
            reconciled_budgets: Self::reconciled_to_dto(result.reconciled_budgets),
            success_message: success_message.to_string(),
        }
    }

    pub fn to_delete_response(result: DeleteTransactionResult) -> DeleteTransactionResponse {
        DeleteTransactionResponse {
            deleted_id: result.deleted_id,
            reconciled_budgets: Self::reconciled_to_dto(result.reconciled_budgets),
            success_message: "Transaction deleted successfully".to_string(),
        }
    }
}
