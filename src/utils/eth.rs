// ============================================================================
// ETH UTILS - Conversión de unidades ether <-> wei
// ============================================================================
// La UI entrega cantidades en ether como string; el contrato trabaja en
// wei. La conversión vive en el cliente, el contrato nunca ve ether.
// ============================================================================

const WEI_DECIMALS: usize = 18;

/// Convertir una cantidad decimal en ether ("1", "0.5", "1.25") a wei.
pub fn to_wei(ether: &str) -> Result<u128, String> {
    let trimmed = ether.trim();
    if trimmed.is_empty() {
        return Err("Empty amount".to_string());
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(format!("Invalid amount: {}", ether));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(format!("Invalid amount: {}", ether));
    }
    if frac_part.len() > WEI_DECIMALS {
        return Err(format!("Too many decimal places: {}", ether));
    }

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| format!("Amount too large: {}", ether))?
    };

    // Parte fraccionaria rellenada a 18 dígitos
    let mut frac_padded = frac_part.to_string();
    while frac_padded.len() < WEI_DECIMALS {
        frac_padded.push('0');
    }
    let frac_value: u128 = if frac_part.is_empty() {
        0
    } else {
        frac_padded
            .parse()
            .map_err(|_| format!("Invalid amount: {}", ether))?
    };

    int_value
        .checked_mul(10u128.pow(WEI_DECIMALS as u32))
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| format!("Amount too large: {}", ether))
}

/// Depósito adjunto al registrar: fracción del precio según política.
/// Divisor 0 se trata como "sin fracción" (depósito = precio completo).
pub fn deposit_for(price_wei: u128, divisor: u64) -> u128 {
    if divisor == 0 {
        price_wei
    } else {
        price_wei / divisor as u128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ether_is_ten_pow_18_wei() {
        assert_eq!(to_wei("1").unwrap(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn fractional_ether() {
        assert_eq!(to_wei("0.5").unwrap(), 500_000_000_000_000_000);
        assert_eq!(to_wei("1.25").unwrap(), 1_250_000_000_000_000_000);
        assert_eq!(to_wei(".5").unwrap(), 500_000_000_000_000_000);
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(to_wei(" 2 ").unwrap(), 2_000_000_000_000_000_000);
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(to_wei("").is_err());
        assert!(to_wei("abc").is_err());
        assert!(to_wei("1.2.3").is_err());
        assert!(to_wei("-1").is_err());
        assert!(to_wei("1.0000000000000000001").is_err());
    }

    #[test]
    fn deposit_is_price_fraction() {
        let price = to_wei("1").unwrap();
        assert_eq!(deposit_for(price, 10), price / 10);
        assert_eq!(deposit_for(price, 10), 100_000_000_000_000_000);
    }

    #[test]
    fn deposit_divisor_zero_means_full_price() {
        assert_eq!(deposit_for(42, 0), 42);
    }
}
