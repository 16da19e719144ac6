//! 走法规则判定
//!
//! 每种棋子一条规则，只看几何关系和阻挡，不考虑将军与飞将。
//! 将军、飞将等整盘局面的过滤由 [`crate::game`] 负责。

use crate::board::Board;
use crate::piece::{Piece, PieceType, Position, Side};

/// 判断棋子从 `from` 走到 `to` 是否符合该棋子的走法规则
///
/// 通用约束在分派前统一检查：两端都在棋盘内、起终点不同、
/// 终点为空或是对方棋子。
pub fn is_legal(board: &Board, piece: Piece, from: Position, to: Position) -> bool {
    if !from.is_valid() || !to.is_valid() || from == to {
        return false;
    }
    if board.get(to).is_some_and(|target| target.side == piece.side) {
        return false;
    }

    match piece.piece_type {
        PieceType::King => king_move(piece.side, from, to),
        PieceType::Advisor => advisor_move(piece.side, from, to),
        PieceType::Bishop => bishop_move(board, piece.side, from, to),
        PieceType::Knight => knight_move(board, from, to),
        PieceType::Rook => rook_move(board, from, to),
        PieceType::Cannon => cannon_move(board, from, to),
        PieceType::Soldier => soldier_move(piece.side, from, to),
    }
}

/// 检查 `target` 是否受到 `by` 方任一棋子的攻击
pub fn is_attacked(board: &Board, target: Position, by: Side) -> bool {
    board
        .pieces(by)
        .into_iter()
        .any(|(pos, piece)| is_legal(board, piece, pos, target))
}

/// 坐标差 (dx, dy)
fn delta(from: Position, to: Position) -> (i8, i8) {
    (to.x as i8 - from.x as i8, to.y as i8 - from.y as i8)
}

/// 将/帅：九宫内直走一步
fn king_move(side: Side, from: Position, to: Position) -> bool {
    let (dx, dy) = delta(from, to);
    to.is_in_palace(side) && dx.abs() + dy.abs() == 1
}

/// 士/仕：九宫内斜走一步
fn advisor_move(side: Side, from: Position, to: Position) -> bool {
    let (dx, dy) = delta(from, to);
    to.is_in_palace(side) && dx.abs() == 1 && dy.abs() == 1
}

/// 象/相：不过河，走田字，象眼不能被堵
fn bishop_move(board: &Board, side: Side, from: Position, to: Position) -> bool {
    let (dx, dy) = delta(from, to);
    if !to.is_own_half(side) || dx.abs() != 2 || dy.abs() != 2 {
        return false;
    }
    from.offset(dx / 2, dy / 2)
        .is_some_and(|eye| board.get(eye).is_none())
}

/// 马/傌：走日字，马腿不能被堵
fn knight_move(board: &Board, from: Position, to: Position) -> bool {
    let (dx, dy) = delta(from, to);
    let leg = match (dx.abs(), dy.abs()) {
        (1, 2) => (0, dy.signum()),
        (2, 1) => (dx.signum(), 0),
        _ => return false,
    };
    from.offset(leg.0, leg.1)
        .is_some_and(|leg| board.get(leg).is_none())
}

/// 车/俥：直线任意距离，中间无子
fn rook_move(board: &Board, from: Position, to: Position) -> bool {
    board.count_between(from, to) == Some(0)
}

/// 炮/砲：不吃子时同车；吃子时中间恰有一个炮架
fn cannon_move(board: &Board, from: Position, to: Position) -> bool {
    let Some(screens) = board.count_between(from, to) else {
        return false;
    };
    match board.get(to) {
        None => screens == 0,
        Some(_) => screens == 1,
    }
}

/// 兵/卒：前进一步；过河后可横走一步；不能后退
fn soldier_move(side: Side, from: Position, to: Position) -> bool {
    let (dx, dy) = delta(from, to);
    if dx == 0 && dy == side.forward() {
        return true;
    }
    dy == 0 && dx.abs() == 1 && from.has_crossed_river(side)
}
