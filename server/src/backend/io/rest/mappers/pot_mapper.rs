use shared::{CreatePotRequest, Pot as PotDto, PotListResponse, UpdatePotRequest};

use crate::backend::domain::commands::pots::{
    CreatePotCommand, PotListResult, PotView, UpdatePotCommand,
};

pub struct PotMapper;

impl PotMapper {
    pub fn to_dto(view: PotView) -> PotDto {
        PotDto {
            id: view.pot.id,
            name: view.pot.name,
            target: view.pot.target,
            total: view.pot.total,
            theme: view.pot.theme,
            percentage: view.percentage,
        }
    }

    pub fn to_dto_list(views: Vec<PotView>) -> Vec<PotDto> {
        views.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreatePotRequest) -> CreatePotCommand {
        CreatePotCommand {
            name: request.name,
            target: request.target,
            theme: request.theme,
            total: request.total,
        }
    }

    pub fn to_update_command(request: UpdatePotRequest) -> UpdatePotCommand {
        UpdatePotCommand {
            name: request.name,
            target: request.target,
            theme: request.theme,
        }
    }

    pub fn to_list_response(result: PotListResult) -> PotListResponse {
        PotListResponse {
            pots: Self::to_dto_list(result.pots),
            total_saved: result.total_saved,
        }
    }
}
