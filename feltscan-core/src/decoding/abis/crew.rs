//! Events of the Influence crew contract (`influence::contracts::crew::Crew`).

use super::corelib::CORE_BOOL;
use crate::decoding::schema::{EventSchema, Field, Shape};

pub static TRANSFER: EventSchema = EventSchema {
    name: "influence::contracts::crew::Crew::Transfer",
    signature: "99cd8bde557814842a3121e8ddfd433a539b8c9f14bf31ebf108d12e6196e9",
    fields: &[
        Field {
            name: "From",
            shape: Shape::String,
        },
        Field {
            name: "To",
            shape: Shape::String,
        },
        Field {
            name: "TokenId",
            shape: Shape::BigInt,
        },
    ],
};

pub static APPROVAL: EventSchema = EventSchema {
    name: "influence::contracts::crew::Crew::Approval",
    signature: "0134692b230b9e1ffa39098904722134159652b09c5bc41d88d6698779d228ff",
    fields: &[
        Field {
            name: "Owner",
            shape: Shape::String,
        },
        Field {
            name: "Approved",
            shape: Shape::String,
        },
        Field {
            name: "TokenId",
            shape: Shape::BigInt,
        },
    ],
};

pub static APPROVAL_FOR_ALL: EventSchema = EventSchema {
    name: "influence::contracts::crew::Crew::ApprovalForAll",
    signature: "06ad9ed7b6318f1bcffefe19df9aeb40d22c36bed567e1925a5ccde0536edd",
    fields: &[
        Field {
            name: "Owner",
            shape: Shape::String,
        },
        Field {
            name: "Operator",
            shape: Shape::String,
        },
        Field {
            name: "Approved",
            shape: CORE_BOOL,
        },
    ],
};

pub static EVENTS: [&EventSchema; 3] = [&APPROVAL, &APPROVAL_FOR_ALL, &TRANSFER];
