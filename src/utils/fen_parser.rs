//! FEN-to-BoardSetup parser.
//!
//! Only syntax is checked here. Positional sanity (one king per side, a
//! plausible en-passant target) is left to `GameState::from_setup`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_setup::BoardSetup;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<BoardSetup> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(ChessError::MissingFenField("board layout"))?;
    let side_part = parts.next().ok_or(ChessError::MissingFenField("side to move"))?;
    let castling_part = parts.next().ok_or(ChessError::MissingFenField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(ChessError::MissingFenField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(ChessError::MissingFenField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(ChessError::MissingFenField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(ChessError::TrailingFenFields);
    }

    Ok(BoardSetup {
        placements: parse_board(board_part)?,
        side_to_move: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_square: parse_en_passant_square(en_passant_part)?,
        fifty_move_counter: parse_counter(halfmove_part)?,
        fullmove_number: parse_counter(fullmove_part)?,
    })
}

fn parse_board(board_part: &str) -> ChessResult<Vec<(Square, Piece)>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::WrongRankCount(ranks.len()));
    }

    let mut placements = Vec::with_capacity(32);
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let bad_width = ChessError::BadRankWidth(board_rank + 1);
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(bad_width);
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(bad_width);
                }
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(ChessError::InvalidPieceChar(ch))?;
            if file >= 8 {
                return Err(bad_width);
            }
            placements.push((square_at(board_rank, file), piece));
            file += 1;
        }

        if file != 8 {
            return Err(bad_width);
        }
    }

    Ok(placements)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CASTLE_NONE);
    }

    let mut rights = CASTLE_NONE;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(ChessError::InvalidCastlingChar(ch)),
        };
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part).map(Some)
}

fn parse_counter(text: &str) -> ChessResult<u16> {
    text.parse::<u16>()
        .map_err(|_| ChessError::InvalidCounter(text.to_owned()))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
