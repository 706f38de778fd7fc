//! Member CLI commands

use clap::Subcommand;

use crate::display::{format_member_details, format_member_list};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{MemberDraft, MemberId};
use crate::services::{integrity, MemberService};
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// Register a new member
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        phone: Option<String>,
    },
    /// List all members
    List,
    /// Show a member and their borrowings
    Show {
        /// Member ID
        id: MemberId,
    },
    /// Edit a member; omitted fields keep their value, an empty phone clears it
    Update {
        /// Member ID
        id: MemberId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
    },
    /// Delete a member holding no open borrowing
    Delete {
        /// Member ID
        id: MemberId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a member command
pub fn handle_member_command(storage: &mut Storage, cmd: MemberCommands) -> LibraryResult<()> {
    match cmd {
        MemberCommands::Add { name, email, phone } => {
            let member = MemberService::new(storage).add(&MemberDraft::new(name, email, phone))?;
            println!("Added member {}: {}", member.id, member.name);
        }

        MemberCommands::List => {
            println!("{}", format_member_list(storage.members.iter()));
        }

        MemberCommands::Show { id } => {
            let member = storage
                .members
                .get(id)
                .ok_or_else(|| LibraryError::member_not_found(id.to_string()))?;
            print!(
                "{}",
                format_member_details(member, &storage.borrowings.for_member(id))
            );
        }

        MemberCommands::Update {
            id,
            name,
            email,
            phone,
        } => {
            if name.is_none() && email.is_none() && phone.is_none() {
                return Err(LibraryError::Validation(
                    "Nothing to update; pass at least one field".into(),
                ));
            }

            let mut service = MemberService::new(storage);
            let mut draft = MemberDraft::from_member(service.get(id)?);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(email) = email {
                draft.email = email;
            }
            if phone.is_some() {
                draft.phone = phone;
            }

            let member = service.update(id, &draft)?;
            println!("Updated member {}: {}", member.id, member.name);
        }

        MemberCommands::Delete { id, force } => {
            if !force {
                let member = storage
                    .members
                    .get(id)
                    .ok_or_else(|| LibraryError::member_not_found(id.to_string()))?;
                integrity::ensure_member_deletable(storage, id)?;
                println!(
                    "This will permanently delete member {}: {} <{}>",
                    member.id, member.name, member.email
                );
                println!("To proceed, run again with --force flag:");
                println!("  library member delete {} --force", id);
                return Ok(());
            }

            let member = MemberService::new(storage).delete(id)?;
            println!("Deleted member {}: {}", member.id, member.name);
        }
    }

    Ok(())
}
