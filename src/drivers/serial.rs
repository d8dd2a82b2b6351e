// =============================================================================
// SERIAL SINK - ZERO OVERHEAD
// =============================================================================
//
// Saída serial do kernel para logging e relatórios.
//
// ARQUITETURA:
// O núcleo não conhece o hardware de saída. Quem faz o boot instala um
// "sink" (uma função `fn(&str)`) e todas as macros de log escrevem nele:
// - SEM core::fmt - Números são convertidos à mão
// - SEM alocação - Conversão em buffer de pilha
// - Sem sink instalado, a saída é descartada
//
// FUNÇÕES DISPONÍVEIS:
// - emit_str(s)      : Envia string
// - emit_dec(v)      : Envia u64 em decimal
// - emit_signed(v)   : Envia i64 em decimal (com sinal)
// - emit_nl()        : Envia newline
//
// =============================================================================

use spin::Mutex;

/// Destino da saída serial.
pub type Sink = fn(&str);

static SINK: Mutex<Option<Sink>> = Mutex::new(None);

/// Instala o sink de saída. Substitui o anterior.
pub fn set_sink(sink: Sink) {
    *SINK.lock() = Some(sink);
}

// =============================================================================
// FUNÇÕES DE ESCRITA - CORE
// =============================================================================

/// Envia uma string para o sink.
#[inline(never)]
pub fn emit_str(s: &str) {
    // Copia o ponteiro e solta o lock antes de escrever:
    // o sink pode ser lento (stdout, arquivo).
    let sink = *SINK.lock();
    if let Some(sink) = sink {
        sink(s);
    }
}

/// Envia uma nova linha.
#[inline(never)]
pub fn emit_nl() {
    emit_str("\n");
}

// =============================================================================
// FUNÇÕES DE ESCRITA - FORMATAÇÃO NUMÉRICA
// =============================================================================

/// Envia um valor u64 em decimal.
pub fn emit_dec(value: u64) {
    let mut buf = [0u8; 20];
    emit_str(format_dec(value, &mut buf));
}

/// Envia um valor i64 em decimal, com '-' quando negativo.
pub fn emit_signed(value: i64) {
    if value < 0 {
        emit_str("-");
    }
    emit_dec(value.unsigned_abs());
}

/// Converte `value` em decimal dentro de `buf`, devolvendo a fatia usada.
pub fn format_dec(mut value: u64, buf: &mut [u8; 20]) -> &str {
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    core::str::from_utf8(&buf[pos..]).unwrap_or("?")
}

#[cfg(test)]
std::thread_local! {
    static CAPTURED: core::cell::RefCell<std::string::String> =
        core::cell::RefCell::new(std::string::String::new());
}

#[cfg(test)]
fn capture_sink(s: &str) {
    CAPTURED.with(|buf| buf.borrow_mut().push_str(s));
}

/// Executa `f` e devolve o que ela escreveu na serial nesta thread.
#[cfg(test)]
pub(crate) fn capture<F: FnOnce()>(f: F) -> std::string::String {
    set_sink(capture_sink);
    CAPTURED.with(|buf| buf.borrow_mut().clear());
    f();
    CAPTURED.with(|buf| buf.borrow_mut().split_off(0))
}
